//! Message record produced by the interception layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One observed chat message.
///
/// Receivers only rely on the [`Display`](fmt::Display) form; the fields are
/// kept so the ingress can accept structured records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRecord {
    /// Host-assigned message identifier
    #[serde(default, alias = "msgId")]
    pub msg_id: i64,
    /// Unix timestamp in seconds
    #[serde(default)]
    pub time: i64,
    /// Host message type code
    #[serde(default, alias = "msgType")]
    pub msg_type: i32,
    /// Account that sent the message
    #[serde(default, alias = "senderUin")]
    pub sender_uin: String,
    /// Conversation peer: a friend account or a group number
    #[serde(default, alias = "peerUin", alias = "friendUin")]
    pub peer_uin: String,
    /// Whether the conversation is a group
    #[serde(default, alias = "isTroop")]
    pub is_troop: bool,
    /// Whether the local account sent the message
    #[serde(default, alias = "isSend")]
    pub is_send: bool,
    /// Plain-text rendering of the message body
    #[serde(default, alias = "msg")]
    pub text: String,
}

impl fmt::Display for MsgRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MsgRecord(msgId={}, time={}, msgType={}, senderUin={}, peerUin={}, isTroop={}, isSend={}, text={})",
            self.msg_id,
            self.time,
            self.msg_type,
            self.sender_uin,
            self.peer_uin,
            self.is_troop,
            self.is_send,
            self.text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_field() {
        let record = MsgRecord {
            msg_id: 42,
            time: 1_700_000_000,
            msg_type: -1000,
            sender_uin: "10001".to_string(),
            peer_uin: "20002".to_string(),
            is_troop: true,
            is_send: false,
            text: "hello".to_string(),
        };

        assert_eq!(
            record.to_string(),
            "MsgRecord(msgId=42, time=1700000000, msgType=-1000, senderUin=10001, \
             peerUin=20002, isTroop=true, isSend=false, text=hello)"
        );
    }

    #[test]
    fn test_deserialize_camel_case_aliases() {
        let json = r#"{"msgId": 7, "senderUin": "1", "friendUin": "2", "msg": "hi"}"#;

        let record: MsgRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.msg_id, 7);
        assert_eq!(record.sender_uin, "1");
        assert_eq!(record.peer_uin, "2");
        assert_eq!(record.text, "hi");
        assert!(!record.is_troop);
    }
}
