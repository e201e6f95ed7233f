//! Outbound message formatting. All messages use HTML parse mode.

use chrono::{DateTime, Utc};
use ratewatch_core::{CurrencyPair, PairQuote, Subscriber, WindowStats};

/// Maximum identities listed in the admin report.
const REPORT_LIMIT: usize = 50;

fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%d %b %H:%M UTC").to_string()
}

/// Reference-pair update: current rate, previous rate with signed delta when
/// known, and 24h extremes when the window has samples.
pub fn format_reference_update(
    pair: &CurrencyPair,
    current: f64,
    previous: Option<f64>,
    stats: Option<&WindowStats>,
    now: DateTime<Utc>,
) -> String {
    let mut msg = match previous {
        Some(last) => format!(
            "📢 <b>{} rate changed!</b>\n\n\
             🟩 New rate: <b>{:.2}</b> {}\n\
             📊 Old rate: <b>{:.2}</b> {}\n\
             📈 Change: <b>{:+.2}</b>",
            pair,
            current,
            pair.counter,
            last,
            pair.counter,
            current - last
        ),
        None => format!(
            "📢 <b>{} rate update</b>\n\n\
             🟩 Current rate: <b>{:.2}</b> {}",
            pair, current, pair.counter
        ),
    };

    if let Some(stats) = stats {
        msg.push_str(&format!(
            "\n\n🏆 24h high: <b>{:.2}</b> at {}\n\
             📉 24h low: <b>{:.2}</b> at {}",
            stats.high.rate,
            format_time(stats.high.ts),
            stats.low.rate,
            format_time(stats.low.ts)
        ));
    }

    msg.push_str(&format!("\n\n⏰ {}", format_time(now)));
    msg
}

/// Generic reply for on-demand queries outside the reference pair.
pub fn format_pair_quote(pair: &CurrencyPair, quote: &PairQuote, now: DateTime<Utc>) -> String {
    let mut msg = format!(
        "💱 <b>Exchange Rate</b>\n\n\
         Pair: <b>{}</b>\n\
         Price: <b>1 {} = {:.4} {}</b>\n\
         Source listing: <code>{}</code>",
        pair, pair.base, quote.rate, pair.counter, quote.source_pair
    );
    if quote.inverted {
        msg.push_str("\n(🔁 derived from the inverse listing)");
    }
    msg.push_str(&format!("\n\n⏰ {}", format_time(now)));
    msg
}

/// Admin subscriber report: count, first identities in registration order,
/// and a suffix for anything past the cap.
pub fn format_subscriber_report(subscribers: &[Subscriber]) -> String {
    let mut lines = vec![format!("📊 <b>Subscribers:</b> {}", subscribers.len())];
    for sub in subscribers.iter().take(REPORT_LIMIT) {
        let handle = sub
            .username
            .as_deref()
            .map(|u| format!(" @{u}"))
            .unwrap_or_default();
        lines.push(format!("- <code>{}</code> {}{}", sub.chat_id, sub.first_name, handle));
    }
    if subscribers.len() > REPORT_LIMIT {
        lines.push(format!("... (+{} more)", subscribers.len() - REPORT_LIMIT));
    }
    lines.join("\n")
}

/// First-contact greeting with the command summary.
pub fn format_welcome(reference: &CurrencyPair) -> String {
    format!(
        "👋 Welcome!\n\n\
         ➤ /rate — current {reference} rate\n\
         ➤ /rate usd/try — any other currency pair\n\
         ➤ Send /rate any time for the latest quote."
    )
}

/// Help for unrecognized slash commands.
pub fn format_help(reference: &CurrencyPair) -> String {
    format!(
        "Commands:\n\
         /rate — {reference} rate\n\
         /rate usd/try — any pair"
    )
}
