use dailydock_domain::notification::NotificationMessage;
use serde_json::json;

const TEMPLATE: &str = "txt";

impl super::PushPlusSender {
    pub(super) fn build_payload(&self, message: &NotificationMessage) -> serde_json::Value {
        json!({
            "token": self.token,
            "title": message.title,
            "content": message.content,
            "template": TEMPLATE,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::notification::PushPlusSender;
    use dailydock_domain::notification::NotificationMessage;
    use std::time::Duration;

    #[test]
    fn test_build_payload() {
        let sender = PushPlusSender::new("tok", Duration::from_secs(10)).unwrap();
        let message = NotificationMessage::new("GLaDOS check-in | ✅1 🔁0 ❌0", "body\nlines");

        let payload = sender.build_payload(&message);

        assert_eq!(payload["token"], "tok");
        assert_eq!(payload["title"], "GLaDOS check-in | ✅1 🔁0 ❌0");
        assert_eq!(payload["content"], "body\nlines");
        assert_eq!(payload["template"], "txt");
    }
}
