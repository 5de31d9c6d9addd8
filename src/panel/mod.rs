//! Terminal front end for the session controller.
//!
//! Stands in for the graphical window: prints what the controller shows and turns
//! typed lines into controller commands.

mod input;
mod terminal;

pub use input::{HELP, InputError, PanelInput, parse_input};
pub use terminal::{SharedTemplate, TerminalPanel};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};
use tracing::{debug, info};

use crate::services::mpris::ControllerEvent;

/// Read commands from `input` and feed them to the controller until `quit` or end of input
///
/// `format` updates `template` in place; the controller reads it on the next render.
/// Help text and parse errors go to `reply`.
pub async fn run_input_loop<R, F>(
    input: R,
    events: mpsc::UnboundedSender<ControllerEvent>,
    template: SharedTemplate,
    mut reply: F,
) where
    R: AsyncBufRead + Unpin,
    F: FnMut(&str),
{
    let mut lines = input.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let event = match parse_input(&line) {
            Ok(PanelInput::Command(command)) => ControllerEvent::Ui(command),
            Ok(PanelInput::SetTemplate(new_template)) => {
                info!("Template set to {new_template:?}");
                match template.write() {
                    Ok(mut current) => *current = new_template,
                    Err(poisoned) => *poisoned.into_inner() = new_template,
                }
                continue;
            }
            Ok(PanelInput::Help) => {
                reply(HELP);
                continue;
            }
            Ok(PanelInput::Empty) => continue,
            Ok(PanelInput::Quit) => break,
            Err(e) => {
                reply(&e.to_string());
                continue;
            }
        };

        if events.send(event).is_err() {
            debug!("Controller stopped, leaving input loop");
            return;
        }
    }

    let _ = events.send(ControllerEvent::Shutdown);
}
