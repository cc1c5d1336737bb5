//! LLM test doubles.


#[cfg(test)]
mod internal_tests {
    use super::tests::{FailingLlm, MockLlm};
    use crate::domain::activity::ChatMessage;
    use crate::port::outbound::llm::Llm;

    #[tokio::test]
    async fn mock_remembers_the_request() {
        let llm = MockLlm::new("hello");
        let reply = llm
            .chat("Be brief.", &[ChatMessage::user("say hello")])
            .await
            .unwrap();
        assert_eq!(reply, "hello");

        let (system, messages) = llm.last_request().unwrap();
        assert_eq!(system, "Be brief.");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "say hello");
    }

    #[tokio::test]
    async fn failing_llm_errors() {
        assert!(FailingLlm.chat("", &[ChatMessage::user("x")]).await.is_err());
    }
}
