use std::io::Write;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_app::{input::HELP, Input, UreqTransport};
use todo_core::{view, ClientConfig, Command, Debouncer, HttpResponse, NetworkError, Ticket, TodoStore};

type Finished = (Ticket, Result<HttpResponse, NetworkError>);

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Logs go to stderr so they never interleave with the rendered list.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();

    let config = ClientConfig::from_env();
    info!(base_url = %config.base_url, recovery = ?config.delete_recovery, "starting todo client");

    let transport = UreqTransport::new();
    let mut store = TodoStore::from_config(&config);
    let mut refresh = Debouncer::new(config.refresh_debounce);
    let (tx, mut rx) = mpsc::unbounded_channel::<Finished>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(cmd) = store.load() {
        dispatch(&transport, &tx, cmd);
    }
    redraw(&store, Some(HELP))?;

    loop {
        let deadline = refresh.deadline();
        let wake = deadline
            .map(tokio::time::Instant::from_std)
            .unwrap_or_else(tokio::time::Instant::now);
        let mut message: Option<String> = None;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = Input::parse(&line);
                match input.refused_while_loading() {
                    Some(reason) if store.is_loading() => message = Some(reason.to_string()),
                    _ => match input {
                        Input::Quit => break,
                        Input::Add(text) => {
                            store.set_draft(text);
                            if let Some(cmd) = store.submit() {
                                dispatch(&transport, &tx, cmd);
                            }
                        }
                        Input::Delete(n) => match store.items().get(n - 1).map(|item| item.id.clone()) {
                            Some(id) => {
                                let cmd = store.delete(&id);
                                dispatch(&transport, &tx, cmd);
                            }
                            None => message = Some(format!("there is no todo #{n}")),
                        },
                        Input::Refresh => refresh.trigger((), Instant::now()),
                        Input::Invalid(reason) => message = Some(reason),
                    },
                }
            }
            Some((ticket, result)) = rx.recv() => {
                let done = store.complete(ticket, result);
                message = done.notice.map(|notice| notice.to_string());
                if let Some(cmd) = done.follow_up {
                    dispatch(&transport, &tx, cmd);
                }
            }
            _ = tokio::time::sleep_until(wake), if deadline.is_some() => {
                if refresh.poll(Instant::now()).is_some() {
                    match store.load() {
                        Some(cmd) => dispatch(&transport, &tx, cmd),
                        None => debug!("refresh skipped, load in flight"),
                    }
                }
            }
        }

        redraw(&store, message.as_deref())?;
    }

    info!(in_flight = store.in_flight(), "exiting");
    Ok(())
}

/// Run `cmd` on the blocking pool and report the outcome on `tx`.
fn dispatch(transport: &UreqTransport, tx: &mpsc::UnboundedSender<Finished>, cmd: Command) {
    let transport = transport.clone();
    let tx = tx.clone();
    debug!(ticket = ?cmd.ticket, method = cmd.request.method.as_str(), "dispatching");
    tokio::task::spawn_blocking(move || {
        let result = transport.execute(cmd.request);
        let _ = tx.send((cmd.ticket, result));
    });
}

fn redraw(store: &TodoStore, message: Option<&str>) -> Result<(), std::io::Error> {
    let mut out = std::io::stdout().lock();
    writeln!(out)?;
    if let Some(message) = message {
        writeln!(out, "! {message}")?;
    }
    write!(out, "{}", view::render(store))?;
    out.flush()
}
