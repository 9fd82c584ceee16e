//! Anchor extraction from directory-listing pages.
//!
//! Plain file servers emit wildly different markup (`python -m
//! http.server`, nginx autoindex, busybox httpd). The scraper below
//! relies only on what they all share: `<a href="...">` tags in
//! document order. Anything fancier belongs to the manifest strategy.

use super::model::clean_name;

/// Track names from a folder listing: hrefs whose last path segment has
/// one of the audio extensions, decoded and trimmed, in page order.
pub(super) fn track_names(html: &str, extensions: &[String]) -> Vec<String> {
    let suffixes = normalize_extensions(extensions);
    anchor_hrefs(html)
        .iter()
        .filter_map(|href| {
            let path = strip_query(href);
            if path.ends_with('/') {
                return None;
            }
            let name = last_segment(path);
            if !has_audio_suffix(name, &suffixes) {
                return None;
            }
            clean_name(name)
        })
        .collect()
}

/// Album folder names from the shelf root listing: hrefs ending in `/`,
/// minus parent and self links.
pub(super) fn folder_names(html: &str) -> Vec<String> {
    anchor_hrefs(html)
        .iter()
        .filter_map(|href| {
            let path = strip_query(href).strip_suffix('/')?;
            let name = clean_name(last_segment(path))?;
            if name == "." || name == ".." {
                return None;
            }
            Some(name)
        })
        .collect()
}

/// Raw href attribute values of `<a>` tags, in document order.
fn anchor_hrefs(html: &str) -> Vec<String> {
    let lower = html.to_ascii_lowercase();
    let mut hrefs = Vec::new();
    let mut at = 0;
    while let Some(rel) = lower[at..].find("<a") {
        let tag_start = at + rel;
        // `<abbr>` and friends also start with "<a".
        let boundary = lower.as_bytes().get(tag_start + 2).copied();
        if !matches!(
            boundary,
            Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'>')
        ) {
            at = tag_start + 2;
            continue;
        }
        let Some(end_rel) = lower[tag_start..].find('>') else {
            break;
        };
        let tag_end = tag_start + end_rel;
        if let Some(href) = href_value(&html[tag_start..tag_end]) {
            hrefs.push(href.to_string());
        }
        at = tag_end + 1;
    }
    hrefs
}

/// Pull the href value out of one tag's text. Quoted and bare attribute
/// forms both occur in the wild.
fn href_value(tag: &str) -> Option<&str> {
    let lower = tag.to_ascii_lowercase();
    let mut search = 0;
    while let Some(rel) = lower[search..].find("href") {
        let pos = search + rel;
        search = pos + 4;
        let rest = tag[pos + 4..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &rest[1..];
                return body.find(quote).map(|end| &body[..end]);
            }
            Some(_) => {
                let end = rest
                    .find(|c: char| c.is_ascii_whitespace())
                    .unwrap_or(rest.len());
                return Some(&rest[..end]);
            }
            None => return None,
        }
    }
    None
}

fn strip_query(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .collect()
}

fn has_audio_suffix(name: &str, suffixes: &[String]) -> bool {
    let lower = name.to_ascii_lowercase();
    suffixes.iter().any(|suffix| lower.ends_with(suffix))
}
