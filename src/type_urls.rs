// Type URLs for the Msg implementations the fee checks care about

// ibc relayer msgs, the default bypass list
pub const MSG_RECV_PACKET_TYPE_URL: &str = "/ibc.core.channel.v1.MsgRecvPacket";
pub const MSG_ACKNOWLEDGEMENT_TYPE_URL: &str = "/ibc.core.channel.v1.MsgAcknowledgement";
pub const MSG_UPDATE_CLIENT_TYPE_URL: &str = "/ibc.core.client.v1.MsgUpdateClient";
pub const MSG_TIMEOUT_TYPE_URL: &str = "/ibc.core.channel.v1.MsgTimeout";
pub const MSG_TIMEOUT_ON_CLOSE_TYPE_URL: &str = "/ibc.core.channel.v1.MsgTimeoutOnClose";

// cosmos-sdk msgs
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

// cosmos-sdk wrapper msgs, these carry other msgs inside them
pub const MSG_EXEC_TYPE_URL: &str = "/cosmos.authz.v1beta1.MsgExec";
