//! Terminal front end for the chat widget.
//!
//! One loop owns the [`ChatWidget`] and selects over terminal events, replies
//! from the [`AdviceDispatcher`] and a redraw tick, so the screen keeps
//! updating while a request is outstanding.

mod keys;
mod view;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::application::{AdviceDispatcher, ChatWidget, GenerateAdviceUseCase};

pub use keys::{handle_key, KeyAction};
pub use view::render;

const TICK: Duration = Duration::from_millis(300);

pub async fn run(widget: ChatWidget, advisor: Arc<GenerateAdviceUseCase>) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, widget, advisor).await;
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    mut widget: ChatWidget,
    advisor: Arc<GenerateAdviceUseCase>,
) -> Result<()> {
    let (dispatcher, mut replies) = AdviceDispatcher::channel(advisor);
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK);
    let mut frame: usize = 0;

    info!("Chat session started");
    loop {
        terminal.draw(|f| render(f, &widget, frame))?;

        tokio::select! {
            _ = tick.tick() => {
                frame = frame.wrapping_add(1);
            }
            Some(resolution) = replies.recv() => {
                widget.resolve(resolution.id, resolution.outcome);
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => match handle_key(&mut widget, key) {
                    KeyAction::Quit => break,
                    KeyAction::Send(ticket) => {
                        debug!("Dispatching request {}", ticket.id());
                        dispatcher.dispatch(ticket);
                    }
                    KeyAction::None => {}
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    if widget.abandon() {
        debug!("Abandoned outstanding request on exit");
    }
    info!(
        "Chat session ended after {} messages",
        widget.conversation().len()
    );
    Ok(())
}
