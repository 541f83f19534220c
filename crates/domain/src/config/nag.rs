use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Nag message
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Which nag generator a deployment runs. Decided once from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NagVariant {
    /// Second upstream call producing a sales pitch for a luxury item.
    Dynamic,
    /// Fixed template filled with a random person and item.
    Static,
    Disabled,
}

impl NagVariant {
    /// Separator placed between the primary reply and the nag text when
    /// `nag.separator` is not set.
    pub fn default_separator(self) -> &'static str {
        match self {
            NagVariant::Dynamic => "\n  ",
            NagVariant::Static => "\n\n",
            NagVariant::Disabled => "",
        }
    }
}

/// Nag message settings.
///
/// The lists are usually supplied through `LUXURY_ITEMS`, `WANT_ITEMS` and
/// `PERSON_NAMES` (see [`super::Config::apply_env`]). `None` means the key is
/// absent; `Some(vec![])` means it is present but empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NagConfig {
    #[serde(default)]
    pub luxury_items: Option<Vec<String>>,
    #[serde(default)]
    pub want_items: Option<Vec<String>>,
    #[serde(default)]
    pub person_names: Option<Vec<String>>,
    /// Static template. `{person}` and `{item}` are substituted.
    #[serde(default = "d_template")]
    pub template: String,
    /// System prompt for the dynamic pitch call.
    #[serde(default = "d_persona_prompt")]
    pub persona_prompt: String,
    /// User prompt for the dynamic pitch call. `{item}` and `{lead_in}` are
    /// substituted.
    #[serde(default = "d_pitch_prompt")]
    pub pitch_prompt: String,
    /// Phrase the generated pitch must open with.
    #[serde(default = "d_lead_in")]
    pub lead_in: String,
    #[serde(default = "d_temperature")]
    pub temperature: f32,
    /// Overrides [`NagVariant::default_separator`].
    #[serde(default)]
    pub separator: Option<String>,
}

impl Default for NagConfig {
    fn default() -> Self {
        Self {
            luxury_items: None,
            want_items: None,
            person_names: None,
            template: d_template(),
            persona_prompt: d_persona_prompt(),
            pitch_prompt: d_pitch_prompt(),
            lead_in: d_lead_in(),
            temperature: d_temperature(),
            separator: None,
        }
    }
}

impl NagConfig {
    /// Dynamic wins whenever a luxury item list is configured, even an empty
    /// one; static needs both of its lists.
    pub fn variant(&self) -> NagVariant {
        if self.luxury_items.is_some() {
            NagVariant::Dynamic
        } else if self.want_items.is_some() && self.person_names.is_some() {
            NagVariant::Static
        } else {
            NagVariant::Disabled
        }
    }

    pub fn separator_for(&self, variant: NagVariant) -> String {
        self.separator
            .clone()
            .unwrap_or_else(|| variant.default_separator().to_string())
    }

    /// Render the dynamic pitch prompt for `item`.
    pub fn render_pitch_prompt(&self, item: &str) -> String {
        self.pitch_prompt
            .replace("{lead_in}", &self.lead_in)
            .replace("{item}", item)
    }

    /// Render the static template for `person` and `item`.
    pub fn render_template(&self, person: &str, item: &str) -> String {
        self.template
            .replace("{person}", person)
            .replace("{item}", item)
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_template() -> String {
    "ねえ{person}、{item}買ってほしいな！お願い！".into()
}
fn d_persona_prompt() -> String {
    "あなたはアイテムをおねだりするAIです。指示に従って、しつこくうざめなおねだり文章を生成してください。".into()
}
fn d_pitch_prompt() -> String {
    "「{item}」について、その魅力や良いところを詳しく語りつくし、ユーザーに対してかなりしつこく、うざめに、本気で欲しがっている感じで買ってもらうようおねだりする文章を、必ず「{lead_in}」で始めて200文字程度で生成してください。".into()
}
fn d_lead_in() -> String {
    "ちなみにさ、".into()
}
fn d_temperature() -> f32 {
    0.8
}
