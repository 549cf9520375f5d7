//! Wrapper messages such as authz `MsgExec` carry other messages inside them.
//! Anything that looks at a transaction's message types has to see through
//! those wrappers, with a bound on how deep it will look.

use crate::error::AnteError;
use crate::type_urls::MSG_EXEC_TYPE_URL;
use cosmos_sdk_proto::cosmos::authz::v1beta1::MsgExec;
use prost::Message;
use prost_types::Any;

pub const DEFAULT_MAX_MSG_NESTING_DEPTH: usize = 5;

/// Implemented by messages that may wrap other messages
pub trait HasInnerMessages {
    fn type_url(&self) -> &str;
    /// The directly wrapped messages, empty for plain messages
    fn inner_messages(&self) -> Result<Vec<Any>, AnteError>;
}

impl HasInnerMessages for Any {
    fn type_url(&self) -> &str {
        &self.type_url
    }

    fn inner_messages(&self) -> Result<Vec<Any>, AnteError> {
        if self.type_url == MSG_EXEC_TYPE_URL {
            let exec = MsgExec::decode(self.value.as_slice()).map_err(|e| {
                AnteError::TxDecode(format!("cannot unmarshal authz exec msgs: {}", e))
            })?;
            return Ok(exec.msgs);
        }
        Ok(Vec::new())
    }
}

/// Returns the type url of every message, wrappers first followed by what
/// they wrap, depth first. Messages wrapped more than `max_depth` levels deep
/// are rejected rather than followed.
pub fn flatten_msg_types<M: HasInnerMessages>(
    msgs: &[M],
    max_depth: usize,
) -> Result<Vec<String>, AnteError> {
    let mut out = Vec::new();
    for msg in msgs {
        collect_msg_types(msg, 0, max_depth, &mut out)?;
    }
    Ok(out)
}

fn collect_msg_types<M: HasInnerMessages>(
    msg: &M,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<String>,
) -> Result<(), AnteError> {
    if depth > max_depth {
        return Err(AnteError::MsgNestingTooDeep {
            depth,
            max: max_depth,
        });
    }
    out.push(msg.type_url().to_string());
    for inner in msg.inner_messages()? {
        collect_msg_types(&inner, depth + 1, max_depth, out)?;
    }
    Ok(())
}
