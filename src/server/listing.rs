//! Directory listings.
//!
//! Entries are produced first and rendered afterwards so the body length is
//! known before the head goes out. The renderer appends to a growing
//! `BytesMut`; there is no fixed-size buffer to outgrow.

use std::borrow::Cow;
use std::io;
use std::path::Path;

use bytes::{BufMut, BytesMut};

/// One line of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListingEntry {
    pub name: String,
    /// `<request path>/<name>`, with the request path taken verbatim.
    pub href: String,
}

impl DirListingEntry {
    pub fn new(request_path: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            href: format!("{request_path}/{name}"),
            name,
        }
    }
}

/// Lists `dir` for a request made as `request_path`.
///
/// The parent entry `..` comes first, the rest follow sorted by name. The
/// self entry `.` never appears.
pub async fn read_entries(dir: &Path, request_path: &str) -> io::Result<Vec<DirListingEntry>> {
    let mut names = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    Ok(std::iter::once("..".to_string())
        .chain(names)
        .map(|name| DirListingEntry::new(request_path, name))
        .collect())
}

/// Renders the HTML page for a listing.
pub fn render(request_path: &str, entries: &[DirListingEntry]) -> BytesMut {
    let title = escape_html(request_path);
    let mut body = BytesMut::with_capacity(256 + entries.len() * 64);

    body.put_slice(
        format!(
            "<html><head><meta charset='utf-8'><title>Index of {title}</title></head>\
             <body><h1>Index of {title}</h1><ul>"
        )
        .as_bytes(),
    );
    for entry in entries {
        body.put_slice(
            format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(&entry.href),
                escape_html(&entry.name)
            )
            .as_bytes(),
        );
    }
    body.put_slice(b"</ul></body></html>");

    body
}

fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
