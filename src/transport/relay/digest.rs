use super::RelayRequest;

pub const DIGEST_HEADER: &str = "📎 Page sent from browser:";
pub const DIGEST_SEPARATOR: &str = "---";

/// Human-readable text handed to the wake action.
///
/// Header, URL, optional time, optional message, then a separator and the
/// selection (or the content when nothing was selected). Empty lines are
/// dropped, so the message and separator sit directly under the header block.
pub fn format_wake_text(request: &RelayRequest) -> String {
    let body = if request.selection.is_empty() {
        &request.content
    } else {
        &request.selection
    };
    let time = (!request.timestamp.is_empty()).then(|| format!("Time: {}", request.timestamp));

    [
        Some(format!("{DIGEST_HEADER} {}", request.title)),
        Some(format!("URL: {}", request.url)),
        time,
        Some(request.message.clone()),
        Some(DIGEST_SEPARATOR.to_string()),
        Some(body.clone()),
    ]
    .into_iter()
    .flatten()
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join("\n")
}
