//! YouTube URL validation

use url::Url;

const VALID_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "gaming.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

const SHORT_HOSTS: &[&str] = &["youtu.be", "www.youtu.be"];

const PATH_PREFIXES: &[&str] = &["embed", "v", "e", "shorts", "live"];

const VIDEO_ID_LEN: usize = 11;

/// Extract the 11-character video id from a YouTube URL.
///
/// Accepts `watch?v=`, `youtu.be/`, `/embed/`, `/v/`, `/shorts/` and
/// `/live/` forms over http or https. Returns `None` for anything else.
pub fn video_id(input: &str) -> Option<String> {
    let parsed = Url::parse(input.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?.to_ascii_lowercase();
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());

    let candidate = if SHORT_HOSTS.contains(&host.as_str()) {
        segments.next()?.to_string()
    } else if VALID_HOSTS.contains(&host.as_str()) {
        match segments.next()? {
            "watch" => parsed
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())?,
            prefix if PATH_PREFIXES.contains(&prefix) => segments.next()?.to_string(),
            _ => return None,
        }
    } else {
        return None;
    };

    is_valid_id(&candidate).then_some(candidate)
}

/// True when `input` is a YouTube video URL this service can handle.
pub fn is_valid_video_url(input: &str) -> bool {
    video_id(input).is_some()
}

fn is_valid_id(id: &str) -> bool {
    id.len() == VIDEO_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_watch_urls() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert!(is_valid_video_url(
            "https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"
        ));
        assert!(is_valid_video_url("http://youtube.com/watch?v=dQw4w9WgXcQ&t=42"));
    }

    #[test]
    fn accepts_short_and_path_forms() {
        assert!(is_valid_video_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_valid_video_url("https://youtu.be/dQw4w9WgXcQ?si=abc"));
        assert!(is_valid_video_url("https://www.youtube.com/shorts/dQw4w9WgXcQ"));
        assert!(is_valid_video_url("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(is_valid_video_url("https://www.youtube.com/live/dQw4w9WgXcQ"));
        assert!(is_valid_video_url(
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ"
        ));
    }

    #[test]
    fn host_match_is_case_insensitive() {
        assert!(is_valid_video_url("https://WWW.YouTube.com/watch?v=dQw4w9WgXcQ"));
    }

    #[test]
    fn rejects_other_hosts_and_schemes() {
        assert!(!is_valid_video_url("https://vimeo.com/123456789"));
        assert!(!is_valid_video_url("https://youtube.com.evil.test/watch?v=dQw4w9WgXcQ"));
        assert!(!is_valid_video_url("ftp://youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(!is_valid_video_url("not a url"));
        assert!(!is_valid_video_url(""));
    }

    #[test]
    fn rejects_non_video_pages() {
        assert!(!is_valid_video_url("https://youtube.com/"));
        assert!(!is_valid_video_url("https://youtube.com/channel/UCxyz"));
        assert!(!is_valid_video_url("https://youtube.com/watch"));
        assert!(!is_valid_video_url("https://youtube.com/watch?v=short"));
        assert!(!is_valid_video_url("https://youtu.be/"));
        assert!(!is_valid_video_url("https://youtu.be/dQw4w9WgXc!"));
    }
}
