use crate::{
    layout::{
        descriptor::LayoutDescriptor,
        style::{CaptionSource, StyleTable, TextRole},
    },
    session::{avatar::PLACEHOLDER_AVATAR, model::SessionRecord},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Per-session literals joined with a [`StyleTable`] to form a card.
pub struct SessionContent {
    /// Output file stem.
    pub output_key: String,
    /// Avatar image path.
    pub avatar: String,
    /// Caption under the avatar.
    pub caption: String,
    /// Session identifier text.
    pub session_id: String,
    /// Track label text.
    pub track: String,
    /// Title text.
    pub title: String,
}

impl SessionContent {
    /// Extract card content from a session whose speakers went through avatar resolution.
    ///
    /// Speakers without a resolved image, and sessions without speakers, get the placeholder.
    pub fn from_session(session: &SessionRecord, caption: &CaptionSource) -> Self {
        let avatar = session
            .speakers
            .first()
            .and_then(|s| s.image.as_deref())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(PLACEHOLDER_AVATAR)
            .to_string();

        let caption = match caption {
            CaptionSource::Literal(text) => text.clone(),
            CaptionSource::SpeakerNames => session
                .speakers
                .iter()
                .map(|s| s.name.trim())
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        };

        Self {
            output_key: session.session_id.clone(),
            avatar,
            caption,
            session_id: session.session_id.clone(),
            track: session.event_type.clone(),
            title: session.name.clone(),
        }
    }

    /// Text for a role.
    pub fn text(&self, role: TextRole) -> &str {
        match role {
            TextRole::Caption => &self.caption,
            TextRole::SessionId => &self.session_id,
            TextRole::Track => &self.track,
            TextRole::Title => &self.title,
        }
    }
}

/// Join content and styles: one avatar image, then caption, id, track and title text.
pub fn compose_layout(content: &SessionContent, styles: &StyleTable) -> LayoutDescriptor {
    let mut layout = LayoutDescriptor::new(content.output_key.clone());
    layout.images.push(styles.avatar.element(content.avatar.clone()));
    for role in TextRole::ALL {
        layout
            .texts
            .push(styles.text_style(role).element(content.text(role)));
    }
    layout
}

/// Build the card layout for one session.
pub fn build_layout(session: &SessionRecord, styles: &StyleTable) -> LayoutDescriptor {
    let content = SessionContent::from_session(session, &styles.caption_source);
    compose_layout(&content, styles)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/builder.rs"]
mod tests;
