use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::app::App;
use crate::backend::Backend;
use crate::ui;

use super::action_queue::channel;
use super::actions::run_action;
use super::views::handle_key;

/// How long a status notice stays up before it fades.
const STATUS_NOTICE_SECS: i64 = 6;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    backend: &Backend,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading {
            app.throbber_state.calc_next();
        }

        if let Some(notice) = &app.status {
            let age = chrono::Utc::now() - notice.shown_at;
            if age.num_seconds() >= STATUS_NOTICE_SECS {
                app.clear_status();
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, app, &action_tx);
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, backend, &action_tx).await?;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
