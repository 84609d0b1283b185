//! Console runner - drives one rating dialog from line-based commands
//!
//! Used by the `taskrate-console` binary. Input and output are injected so
//! tests can script a session.

use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use futures_channel::mpsc::UnboundedReceiver;
use taskrate_domain::{Notice, NoticeSeverity, RatingContext, StarRating, TaskId, UserId};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::application::services::{
    CloseDecision, RatingDialog, RatingDialogPorts, RatingDialogService, SubmitResult,
};
use crate::config::ClientConfig;
use crate::infrastructure::{
    ChannelDialogEvents, ChannelNotifier, FakeRatingBackend, FanoutNotifier, TracingNotifier,
};
use crate::ports::outbound::{CloseReason, NotificationPort};
use crate::presentation::RatingDialogView;

const HELP: &str = "commands: select <1-5>, hover <1-5>, leave, submit, close, show, help, quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Select(StarRating),
    Hover(StarRating),
    Leave,
    Submit,
    Close,
    Show,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next();

        let stars = |arg: Option<&str>| -> Result<StarRating, String> {
            let raw = arg.ok_or_else(|| format!("{verb} needs a star count"))?;
            let value: u8 = raw
                .parse()
                .map_err(|_| format!("not a number: {raw}"))?;
            StarRating::new(value).map_err(|e| e.to_string())
        };

        match verb.as_str() {
            "select" | "s" => stars(arg).map(Self::Select),
            "hover" | "h" => stars(arg).map(Self::Hover),
            "leave" | "l" => Ok(Self::Leave),
            "submit" => Ok(Self::Submit),
            "close" | "cancel" => Ok(Self::Close),
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Wire the fake backend and console adapters, then run one dialog on stdin.
pub async fn run(config: ClientConfig) -> anyhow::Result<()> {
    let mut backend = FakeRatingBackend::new(config.fake_outcome);
    if let Some(latency) = config.fake_latency {
        backend = backend.with_latency(latency);
    }

    let (channel, notices) = ChannelNotifier::channel();
    let (events, closes) = ChannelDialogEvents::channel();
    let notifier = FanoutNotifier::new(vec![
        Arc::new(TracingNotifier) as Arc<dyn NotificationPort>,
        Arc::new(channel),
    ]);

    let service = RatingDialogService::new(RatingDialogPorts::new(
        Arc::new(backend),
        Arc::new(notifier),
        Arc::new(events),
    ));
    let context = RatingContext::new(
        TaskId::new(),
        UserId::new(),
        config.subject_label,
        config.task_title,
        config.perspective,
    )
    .with_mode(config.mode);
    let dialog = service.open(context);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    drive(&dialog, notices, closes, stdin, &mut stdout).await
}

/// Feed commands from `input` into `dialog` until a close event arrives on
/// `closes`, the user quits, or input ends.
pub async fn drive<R, W>(
    dialog: &RatingDialog,
    mut notices: UnboundedReceiver<Notice>,
    mut closes: UnboundedReceiver<CloseReason>,
    input: R,
    output: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    render(dialog, output)?;
    writeln!(output, "{HELP}")?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading command")? {
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };

        match command {
            ConsoleCommand::Select(rating) => dialog.select_candidate(rating),
            ConsoleCommand::Hover(rating) => dialog.preview_candidate(rating),
            ConsoleCommand::Leave => dialog.clear_preview(),
            ConsoleCommand::Submit => {
                if let SubmitResult::AlreadySubmitting = dialog.request_submit().await {
                    writeln!(output, "a submission is already in flight")?;
                }
            }
            ConsoleCommand::Close => {
                if dialog.request_close() == CloseDecision::Blocked {
                    writeln!(output, "this rating is required and cannot be skipped")?;
                }
            }
            ConsoleCommand::Show => {}
            ConsoleCommand::Help => writeln!(output, "{HELP}")?,
            ConsoleCommand::Quit => break,
        }

        print_notices(&mut notices, output)?;
        if let Ok(Some(reason)) = closes.try_next() {
            let why = match reason {
                CloseReason::Submitted => "rating submitted",
                CloseReason::Dismissed => "dismissed",
            };
            writeln!(output, "dialog closed ({why})")?;
            return Ok(());
        }
        render(dialog, output)?;
    }

    Ok(())
}

fn render<W: Write>(dialog: &RatingDialog, output: &mut W) -> anyhow::Result<()> {
    let view = RatingDialogView::for_dialog(dialog);
    writeln!(output, "== {} ==", view.title)?;
    writeln!(output, "{}", view.description)?;
    if let Some(note) = view.enforcement_note {
        writeln!(output, "! {note}")?;
    }
    writeln!(output, "{}  {}", view.star_strip(), view.caption)?;
    Ok(())
}

fn print_notices<W: Write>(
    notices: &mut UnboundedReceiver<Notice>,
    output: &mut W,
) -> anyhow::Result<()> {
    while let Ok(Some(notice)) = notices.try_next() {
        let tag = match notice.severity {
            NoticeSeverity::Info => "info",
            NoticeSeverity::Error => "error",
        };
        writeln!(output, "[{tag}] {}: {}", notice.title, notice.description)?;
    }
    Ok(())
}
