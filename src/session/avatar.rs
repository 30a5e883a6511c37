use std::path::{Path, PathBuf};

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::session::model::{SessionRecord, SpeakerRecord};

/// Image path used for speakers without a usable avatar.
pub const PLACEHOLDER_AVATAR: &str = "placeholder.jpg";

/// Avatar references shorter than this (in characters) are treated as absent.
pub const MIN_AVATAR_REF_LEN: usize = 3;

const RASTER_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Maps a remote avatar reference to a local image file.
///
/// Fetching is out of scope for this crate; implementations look up files something else has
/// already downloaded.
pub trait AvatarResolver: Sync {
    /// Local path for `avatar_url`, or `None` if nothing usable is available.
    fn resolve(&self, speaker_name: &str, avatar_url: &str) -> Option<PathBuf>;
}

/// Resolve one speaker, falling back to [`PLACEHOLDER_AVATAR`].
pub fn resolve_avatar(resolver: &dyn AvatarResolver, speaker: &SpeakerRecord) -> String {
    let url = speaker.avatar.trim();
    if url.chars().count() < MIN_AVATAR_REF_LEN {
        return PLACEHOLDER_AVATAR.to_string();
    }
    match resolver.resolve(&speaker.name, url) {
        Some(path) => path.to_string_lossy().into_owned(),
        None => {
            tracing::debug!(speaker = %speaker.name, url, "avatar unavailable, using placeholder");
            PLACEHOLDER_AVATAR.to_string()
        }
    }
}

/// Fill in `image` for every speaker of `session`.
pub fn resolve_speakers(session: &mut SessionRecord, resolver: &dyn AvatarResolver) {
    for speaker in &mut session.speakers {
        speaker.image = Some(resolve_avatar(resolver, speaker));
    }
}

/// Finds pre-fetched avatars stored as `<dir>/<slug of speaker name>.<ext>`.
#[derive(Clone, Debug)]
pub struct DirectoryAvatarResolver {
    dir: PathBuf,
}

impl DirectoryAvatarResolver {
    /// Resolver over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory searched for avatars.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AvatarResolver for DirectoryAvatarResolver {
    fn resolve(&self, speaker_name: &str, avatar_url: &str) -> Option<PathBuf> {
        let slug = slugify(speaker_name);
        if slug.is_empty() {
            return None;
        }

        let mut candidates = Vec::with_capacity(RASTER_EXTENSIONS.len());
        if let Some(ext) = url_extension(avatar_url) {
            candidates.push(ext);
        }
        for ext in RASTER_EXTENSIONS {
            if !candidates.iter().any(|c| c == ext) {
                candidates.push(ext.to_string());
            }
        }

        candidates
            .into_iter()
            .map(|ext| self.dir.join(format!("{slug}.{ext}")))
            .find(|p| p.is_file())
    }
}

/// Lowercase ASCII slug: accents are stripped, alphanumerics kept, everything else collapsed to
/// single dashes.
///
/// `"José Müller"` becomes `"jose-muller"`. Letters with no ASCII decomposition outside a few
/// Latin ligatures (e.g. CJK) are dropped.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    let mut buf = [0u8; 4];
    for c in s.nfkd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase) {
        let piece: &str = match c {
            'ß' => "ss",
            'æ' => "ae",
            'œ' => "oe",
            'ø' => "o",
            'ł' => "l",
            'đ' | 'ð' => "d",
            'þ' => "th",
            _ if c.is_ascii_alphanumeric() => c.encode_utf8(&mut buf),
            _ => {
                pending_dash = true;
                continue;
            }
        };
        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        out.push_str(piece);
    }
    out
}

fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    RASTER_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

#[cfg(test)]
#[path = "../../tests/unit/session/avatar.rs"]
mod tests;
