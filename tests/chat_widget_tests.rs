//! Chat widget behaviour across full send cycles.

use std::sync::Arc;
use std::time::Duration;

use voltsafe::{
    AdviceDispatcher, AdviceReply, ChatWidget, GenerateAdviceUseCase, Role, ScriptedChatClient,
    WidgetState, GREETING_TEXT,
};

fn advisor(client: ScriptedChatClient) -> Arc<GenerateAdviceUseCase> {
    Arc::new(GenerateAdviceUseCase::new(Arc::new(client)))
}

#[test]
fn initial_conversation_is_the_greeting() {
    let widget = ChatWidget::new();
    let messages = widget.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role(), Role::Model);
    assert_eq!(messages[0].text(), GREETING_TEXT);
    assert_eq!(widget.state(), WidgetState::Idle);
}

#[tokio::test]
async fn switchboard_question_appends_user_then_model() {
    let advisor = advisor(ScriptedChatClient::new().with_reply(
        "Yes! Switchboard upgrades typically range from $1,500 - $3,000 AUD.",
    ));
    let mut widget = ChatWidget::new();
    widget.open();
    widget.set_input("Do you install switchboards?");

    let ticket = widget.submit().expect("accepted");
    assert_eq!(widget.state(), WidgetState::Sending);

    let reply = advisor.execute(ticket.query()).await;
    assert!(widget.resolve(ticket.id(), Ok(reply)));

    let messages = widget.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role(), Role::User);
    assert_eq!(messages[1].text(), "Do you install switchboards?");
    assert_eq!(messages[2].role(), Role::Model);
    assert!(messages[2].text().contains("$1,500"));
    assert!(!widget.is_loading());
}

#[tokio::test]
async fn second_submit_while_sending_is_dropped() {
    let advisor = advisor(
        ScriptedChatClient::new()
            .with_reply("first answer")
            .with_delay(Duration::from_millis(50)),
    );
    let (dispatcher, mut replies) = AdviceDispatcher::channel(advisor);
    let mut widget = ChatWidget::new();

    let ticket = widget.submit_text("first").expect("accepted");
    dispatcher.dispatch(ticket);

    let before = widget.messages().to_vec();
    assert!(widget.submit_text("second").is_none());
    assert_eq!(widget.messages(), before.as_slice());

    let resolution = replies.recv().await.expect("reply");
    widget.resolve(resolution.id, resolution.outcome);

    let texts: Vec<&str> = widget.messages().iter().map(|m| m.text()).collect();
    assert_eq!(texts, vec![GREETING_TEXT, "first", "first answer"]);
}

#[tokio::test]
async fn timestamps_follow_append_order() {
    let advisor = advisor(ScriptedChatClient::new().with_reply("ok"));
    let mut widget = ChatWidget::new();

    for question in ["one", "two", "three"] {
        assert!(widget.send(&advisor, question).await);
    }

    let messages = widget.messages();
    assert_eq!(messages.len(), 7);
    for pair in messages.windows(2) {
        assert!(pair[0].timestamp() <= pair[1].timestamp());
    }
}

#[tokio::test]
async fn abandoned_request_never_lands() {
    let advisor = advisor(
        ScriptedChatClient::new()
            .with_reply("late")
            .with_delay(Duration::from_millis(50)),
    );
    let (dispatcher, mut replies) = AdviceDispatcher::channel(advisor);
    let mut widget = ChatWidget::new();

    let ticket = widget.submit_text("hello").expect("accepted");
    let id = ticket.id();
    let handle = dispatcher.dispatch(ticket);
    widget.close();
    assert!(widget.abandon());
    handle.await.expect("dispatch task");

    assert!(replies.try_recv().is_err());
    assert!(!widget.resolve(id, Ok(AdviceReply::answered("late"))));
    assert_eq!(widget.messages().len(), 2);
    assert_eq!(widget.state(), WidgetState::Idle);
}
