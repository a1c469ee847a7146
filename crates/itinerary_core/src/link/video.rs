//! Video-host link probing and embed URL derivation.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const VIDEO_HOST_FRAGMENTS: &[&str] = &["youtube.com", "youtu.be"];
const SHORT_LINK_HOST_FRAGMENT: &str = "youtu.be";
const VIDEO_ID_QUERY_KEY: &str = "v";
const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";

static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid video id regex"));

/// Returns true iff `link` is an absolute URL on a recognized video host.
pub fn is_video_link(link: &str) -> bool {
    parse_video_url(link).is_some()
}

/// Derives `https://www.youtube.com/embed/<id>` from a recognized video link.
///
/// The id is taken from the short-link path (`youtu.be/<id>`), the `v` query
/// parameter, or an existing `/embed/<id>` or `/shorts/<id>` path. Returns
/// `None` when the link is malformed or no id can be located.
pub fn to_embed_url(link: &str) -> Option<String> {
    let url = parse_video_url(link)?;
    let video_id = if url.host_str()?.contains(SHORT_LINK_HOST_FRAGMENT) {
        first_path_segment(&url)
    } else {
        query_video_id(&url).or_else(|| prefixed_path_id(&url))
    }?;

    VIDEO_ID_RE
        .is_match(&video_id)
        .then(|| format!("{EMBED_PREFIX}{video_id}"))
}

fn parse_video_url(link: &str) -> Option<Url> {
    let url = Url::parse(link.trim()).ok()?;
    let host = url.host_str()?;
    VIDEO_HOST_FRAGMENTS
        .iter()
        .any(|fragment| host.contains(fragment))
        .then_some(url)
}

fn first_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn query_video_id(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == VIDEO_ID_QUERY_KEY)
        .map(|(_, value)| value.into_owned())
}

fn prefixed_path_id(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());
    match segments.next()? {
        "embed" | "shorts" => segments.next().map(str::to_string),
        _ => None,
    }
}
