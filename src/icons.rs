use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Handle to a canonical glyph in the icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IconRef(&'static str);

impl IconRef {
    pub const fn id(self) -> &'static str {
        self.0
    }

    /// Glyph name without the icon-set prefix.
    pub fn glyph(self) -> &'static str {
        self.0.split_once(':').map(|(_, name)| name).unwrap_or(self.0)
    }

    /// Every distinct glyph referenced by the table, in table order.
    pub fn all() -> Vec<IconRef> {
        let mut seen: Vec<IconRef> = Vec::new();
        for &(_, id) in ICON_ENTRIES {
            let icon = IconRef(id);
            if !seen.contains(&icon) {
                seen.push(icon);
            }
        }
        seen
    }
}

static NAMESPACE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:mdi|lucide|mingcute|feather)/").unwrap());

static ICON_TABLE: Lazy<HashMap<&'static str, IconRef>> = Lazy::new(|| {
    ICON_ENTRIES
        .iter()
        .map(|&(key, id)| (key, IconRef(id)))
        .collect()
});

// Keys are stored in normalized form. Synonyms share a glyph.
const ICON_ENTRIES: &[(&str, &str)] = &[
    // AI and computing
    ("robot", "lucide:bot"),
    ("bot", "lucide:bot"),
    ("ai", "lucide:bot"),
    ("assistant", "lucide:bot"),
    ("brain", "lucide:brain"),
    ("mind", "lucide:brain"),
    ("intelligence", "lucide:brain"),
    ("thinking", "lucide:brain"),
    ("cpu", "lucide:cpu"),
    ("chip", "lucide:cpu"),
    ("ai-chip", "lucide:cpu"),
    ("processor", "lucide:cpu"),
    ("hardware", "lucide:cpu"),
    ("server", "lucide:server"),
    ("hosting", "lucide:server"),
    ("database", "lucide:database"),
    ("db", "lucide:database"),
    ("storage", "lucide:database"),
    ("data", "lucide:database"),
    ("cloud", "lucide:cloud"),
    ("saas", "lucide:cloud"),
    ("code", "lucide:code"),
    ("coding", "lucide:code"),
    ("developer", "lucide:code"),
    ("programming", "lucide:code"),
    ("terminal", "lucide:terminal"),
    ("console", "lucide:terminal"),
    ("command", "lucide:terminal"),
    ("api", "lucide:plug"),
    ("plug", "lucide:plug"),
    ("integration", "lucide:plug"),
    ("network", "lucide:network"),
    ("connection", "lucide:network"),
    ("globe", "lucide:globe"),
    ("internet", "lucide:globe"),
    ("world", "lucide:globe"),
    ("web", "lucide:globe"),
    ("global", "lucide:globe"),
    ("wifi", "lucide:wifi"),
    ("wireless", "lucide:wifi"),
    ("laptop", "lucide:laptop"),
    ("monitor", "lucide:monitor"),
    ("computer", "lucide:monitor"),
    ("desktop", "lucide:monitor"),
    ("screen", "lucide:monitor"),
    ("smartphone", "lucide:smartphone"),
    ("phone", "lucide:smartphone"),
    ("mobile", "lucide:smartphone"),
    ("app", "lucide:smartphone"),
    ("sparkles", "lucide:sparkles"),
    ("magic", "lucide:sparkles"),
    ("generative", "lucide:sparkles"),
    ("workflow", "lucide:workflow"),
    ("automation", "lucide:workflow"),
    ("process", "lucide:workflow"),
    ("algorithm", "lucide:workflow"),
    ("settings", "lucide:settings"),
    ("cog", "lucide:settings"),
    ("gear", "lucide:settings"),
    ("config", "lucide:settings"),
    ("wrench", "lucide:wrench"),
    ("tool", "lucide:wrench"),
    ("tools", "lucide:wrench"),
    ("maintenance", "lucide:wrench"),
    ("bug", "lucide:bug"),
    ("debug", "lucide:bug"),
    ("git", "lucide:git-branch"),
    ("branch", "lucide:git-branch"),
    ("github", "lucide:github"),
    ("fingerprint", "lucide:fingerprint"),
    ("identity", "lucide:fingerprint"),
    ("biometric", "lucide:fingerprint"),
    ("qr-code", "lucide:qr-code"),
    ("scan", "lucide:scan"),
    // Communication
    ("chat", "lucide:message-circle"),
    ("message", "lucide:message-circle"),
    ("comment", "lucide:message-circle"),
    ("feedback", "lucide:message-circle"),
    ("conversation", "lucide:messages-square"),
    ("discussion", "lucide:messages-square"),
    ("mail", "lucide:mail"),
    ("email", "lucide:mail"),
    ("envelope", "lucide:mail"),
    ("send", "lucide:send"),
    ("bell", "lucide:bell"),
    ("notification", "lucide:bell"),
    ("reminder", "lucide:bell"),
    ("megaphone", "lucide:megaphone"),
    ("announcement", "lucide:megaphone"),
    ("marketing", "lucide:megaphone"),
    ("share", "lucide:share-2"),
    ("social", "lucide:share-2"),
    ("link", "lucide:link"),
    ("url", "lucide:link"),
    ("headphones", "lucide:headphones"),
    ("support", "lucide:headphones"),
    ("customer-service", "lucide:headphones"),
    ("languages", "lucide:languages"),
    ("language", "lucide:languages"),
    ("translate", "lucide:languages"),
    ("hash", "lucide:hash"),
    ("hashtag", "lucide:hash"),
    ("at", "lucide:at-sign"),
    // Money and commerce
    ("dollar", "lucide:dollar-sign"),
    ("money", "lucide:dollar-sign"),
    ("usd", "lucide:dollar-sign"),
    ("cash", "lucide:dollar-sign"),
    ("revenue", "lucide:dollar-sign"),
    ("cost", "lucide:dollar-sign"),
    ("tag", "lucide:tag"),
    ("price", "lucide:tag"),
    ("pricing", "lucide:tag"),
    ("label", "lucide:tag"),
    ("wallet", "lucide:wallet"),
    ("credit-card", "lucide:credit-card"),
    ("card", "lucide:credit-card"),
    ("payment", "lucide:credit-card"),
    ("bank", "lucide:landmark"),
    ("finance", "lucide:landmark"),
    ("government", "lucide:landmark"),
    ("coins", "lucide:coins"),
    ("crypto", "lucide:coins"),
    ("piggy-bank", "lucide:piggy-bank"),
    ("savings", "lucide:piggy-bank"),
    ("budget", "lucide:piggy-bank"),
    ("shopping-cart", "lucide:shopping-cart"),
    ("cart", "lucide:shopping-cart"),
    ("ecommerce", "lucide:shopping-cart"),
    ("store", "lucide:store"),
    ("shop", "lucide:store"),
    ("retail", "lucide:store"),
    ("percent", "lucide:percent"),
    ("discount", "lucide:percent"),
    ("sale", "lucide:percent"),
    ("receipt", "lucide:receipt"),
    ("invoice", "lucide:receipt"),
    ("billing", "lucide:receipt"),
    // Status
    ("warning", "lucide:triangle-alert"),
    ("alert", "lucide:triangle-alert"),
    ("caution", "lucide:triangle-alert"),
    ("risk", "lucide:triangle-alert"),
    ("error", "lucide:circle-x"),
    ("cancel", "lucide:circle-x"),
    ("fail", "lucide:circle-x"),
    ("x", "lucide:x"),
    ("close", "lucide:x"),
    ("check", "lucide:check"),
    ("checkmark", "lucide:check"),
    ("done", "lucide:check"),
    ("success", "lucide:circle-check"),
    ("ok", "lucide:circle-check"),
    ("approved", "lucide:circle-check"),
    ("info", "lucide:info"),
    ("information", "lucide:info"),
    ("about", "lucide:info"),
    ("help", "lucide:circle-help"),
    ("question", "lucide:circle-help"),
    ("faq", "lucide:circle-help"),
    ("star", "lucide:star"),
    ("favorite", "lucide:star"),
    ("rating", "lucide:star"),
    ("quality", "lucide:star"),
    ("heart", "lucide:heart"),
    ("love", "lucide:heart"),
    ("care", "lucide:heart"),
    ("thumbs-up", "lucide:thumbs-up"),
    ("like", "lucide:thumbs-up"),
    ("approve", "lucide:thumbs-up"),
    ("thumbs-down", "lucide:thumbs-down"),
    ("dislike", "lucide:thumbs-down"),
    ("flag", "lucide:flag"),
    ("milestone", "lucide:flag"),
    ("shield", "lucide:shield"),
    ("security", "lucide:shield"),
    ("protection", "lucide:shield"),
    ("safe", "lucide:shield"),
    ("privacy", "lucide:shield"),
    ("lock", "lucide:lock"),
    ("secure", "lucide:lock"),
    ("unlock", "lucide:lock-open"),
    ("key", "lucide:key"),
    ("password", "lucide:key"),
    ("access", "lucide:key"),
    // Charts and documents
    ("chart", "lucide:bar-chart-3"),
    ("bar-chart", "lucide:bar-chart-3"),
    ("analytics", "lucide:bar-chart-3"),
    ("statistics", "lucide:bar-chart-3"),
    ("stats", "lucide:bar-chart-3"),
    ("metrics", "lucide:bar-chart-3"),
    ("pie-chart", "lucide:pie-chart"),
    ("pie", "lucide:pie-chart"),
    ("share-of", "lucide:pie-chart"),
    ("line-chart", "lucide:line-chart"),
    ("trending-up", "lucide:trending-up"),
    ("trend", "lucide:trending-up"),
    ("growth", "lucide:trending-up"),
    ("increase", "lucide:trending-up"),
    ("profit", "lucide:trending-up"),
    ("trending-down", "lucide:trending-down"),
    ("decline", "lucide:trending-down"),
    ("decrease", "lucide:trending-down"),
    ("loss", "lucide:trending-down"),
    ("arrow-up", "lucide:arrow-up"),
    ("up", "lucide:arrow-up"),
    ("arrow-down", "lucide:arrow-down"),
    ("down", "lucide:arrow-down"),
    ("arrow-right", "lucide:arrow-right"),
    ("next", "lucide:arrow-right"),
    ("forward", "lucide:arrow-right"),
    ("arrow-left", "lucide:arrow-left"),
    ("back", "lucide:arrow-left"),
    ("previous", "lucide:arrow-left"),
    ("activity", "lucide:activity"),
    ("pulse", "lucide:activity"),
    ("monitoring", "lucide:activity"),
    ("target", "lucide:target"),
    ("goal", "lucide:target"),
    ("aim", "lucide:target"),
    ("objective", "lucide:target"),
    ("focus", "lucide:target"),
    ("dashboard", "lucide:layout-dashboard"),
    ("overview", "lucide:layout-dashboard"),
    ("file-text", "lucide:file-text"),
    ("document", "lucide:file-text"),
    ("doc", "lucide:file-text"),
    ("report", "lucide:file-text"),
    ("article", "lucide:file-text"),
    ("file", "lucide:file"),
    ("folder", "lucide:folder"),
    ("directory", "lucide:folder"),
    ("clipboard", "lucide:clipboard"),
    ("list-checks", "lucide:list-checks"),
    ("checklist", "lucide:list-checks"),
    ("task", "lucide:list-checks"),
    ("todo", "lucide:list-checks"),
    ("list", "lucide:list"),
    ("layers", "lucide:layers"),
    ("stack", "lucide:layers"),
    ("levels", "lucide:layers"),
    ("puzzle", "lucide:puzzle"),
    ("component", "lucide:puzzle"),
    ("plugin", "lucide:puzzle"),
    ("grid", "lucide:grid-3x3"),
    ("matrix", "lucide:grid-3x3"),
    // People
    ("user", "lucide:user"),
    ("person", "lucide:user"),
    ("profile", "lucide:user"),
    ("account", "lucide:user"),
    ("users", "lucide:users"),
    ("team", "lucide:users"),
    ("people", "lucide:users"),
    ("group", "lucide:users"),
    ("community", "lucide:users"),
    ("audience", "lucide:users"),
    ("customer", "lucide:user-round"),
    ("client", "lucide:user-round"),
    ("handshake", "lucide:handshake"),
    ("partnership", "lucide:handshake"),
    ("deal", "lucide:handshake"),
    ("agreement", "lucide:handshake"),
    ("collaboration", "lucide:handshake"),
    ("award", "lucide:award"),
    ("medal", "lucide:award"),
    ("certificate", "lucide:award"),
    ("trophy", "lucide:trophy"),
    ("winner", "lucide:trophy"),
    ("achievement", "lucide:trophy"),
    ("crown", "lucide:crown"),
    ("leader", "lucide:crown"),
    ("premium", "lucide:crown"),
    ("graduation-cap", "lucide:graduation-cap"),
    ("graduation", "lucide:graduation-cap"),
    ("education", "lucide:graduation-cap"),
    ("school", "lucide:graduation-cap"),
    ("learn", "lucide:graduation-cap"),
    ("training", "lucide:graduation-cap"),
    ("book", "lucide:book-open"),
    ("reading", "lucide:book-open"),
    ("knowledge", "lucide:book-open"),
    ("library", "lucide:library"),
    ("smile", "lucide:smile"),
    ("happy", "lucide:smile"),
    ("satisfaction", "lucide:smile"),
    ("frown", "lucide:frown"),
    ("sad", "lucide:frown"),
    // Time
    ("clock", "lucide:clock"),
    ("time", "lucide:clock"),
    ("hours", "lucide:clock"),
    ("timer", "lucide:timer"),
    ("stopwatch", "lucide:timer"),
    ("calendar", "lucide:calendar"),
    ("date", "lucide:calendar"),
    ("schedule", "lucide:calendar"),
    ("event", "lucide:calendar"),
    ("history", "lucide:history"),
    ("past", "lucide:history"),
    ("hourglass", "lucide:hourglass"),
    ("deadline", "lucide:hourglass"),
    ("waiting", "lucide:hourglass"),
    // Places and things
    ("rocket", "lucide:rocket"),
    ("launch", "lucide:rocket"),
    ("startup", "lucide:rocket"),
    ("lightbulb", "lucide:lightbulb"),
    ("bulb", "lucide:lightbulb"),
    ("idea", "lucide:lightbulb"),
    ("innovation", "lucide:lightbulb"),
    ("insight", "lucide:lightbulb"),
    ("zap", "lucide:zap"),
    ("lightning", "lucide:zap"),
    ("energy", "lucide:zap"),
    ("power", "lucide:zap"),
    ("fast", "lucide:zap"),
    ("gauge", "lucide:gauge"),
    ("speed", "lucide:gauge"),
    ("performance", "lucide:gauge"),
    ("efficiency", "lucide:gauge"),
    ("flame", "lucide:flame"),
    ("fire", "lucide:flame"),
    ("hot", "lucide:flame"),
    ("trending", "lucide:flame"),
    ("leaf", "lucide:leaf"),
    ("eco", "lucide:leaf"),
    ("nature", "lucide:leaf"),
    ("sustainability", "lucide:leaf"),
    ("green", "lucide:leaf"),
    ("tree", "lucide:tree-pine"),
    ("forest", "lucide:tree-pine"),
    ("sun", "lucide:sun"),
    ("solar", "lucide:sun"),
    ("moon", "lucide:moon"),
    ("night", "lucide:moon"),
    ("home", "lucide:house"),
    ("house", "lucide:house"),
    ("building", "lucide:building-2"),
    ("office", "lucide:building-2"),
    ("company", "lucide:building-2"),
    ("business", "lucide:building-2"),
    ("enterprise", "lucide:building-2"),
    ("factory", "lucide:factory"),
    ("industry", "lucide:factory"),
    ("manufacturing", "lucide:factory"),
    ("map", "lucide:map"),
    ("map-pin", "lucide:map-pin"),
    ("location", "lucide:map-pin"),
    ("pin", "lucide:map-pin"),
    ("place", "lucide:map-pin"),
    ("compass", "lucide:compass"),
    ("navigation", "lucide:compass"),
    ("direction", "lucide:compass"),
    ("explore", "lucide:compass"),
    ("car", "lucide:car"),
    ("transport", "lucide:car"),
    ("truck", "lucide:truck"),
    ("delivery", "lucide:truck"),
    ("shipping", "lucide:truck"),
    ("logistics", "lucide:truck"),
    ("plane", "lucide:plane"),
    ("travel", "lucide:plane"),
    ("flight", "lucide:plane"),
    ("package", "lucide:package"),
    ("box", "lucide:package"),
    ("product", "lucide:package"),
    ("inventory", "lucide:package"),
    ("gift", "lucide:gift"),
    ("bonus", "lucide:gift"),
    ("camera", "lucide:camera"),
    ("image", "lucide:image"),
    ("photo", "lucide:image"),
    ("picture", "lucide:image"),
    ("video", "lucide:video"),
    ("film", "lucide:video"),
    ("music", "lucide:music"),
    ("audio", "lucide:music"),
    ("mic", "lucide:mic"),
    ("microphone", "lucide:mic"),
    ("podcast", "lucide:mic"),
    ("search", "lucide:search"),
    ("find", "lucide:search"),
    ("magnify", "lucide:search"),
    ("discover", "lucide:search"),
    ("eye", "lucide:eye"),
    ("view", "lucide:eye"),
    ("vision", "lucide:eye"),
    ("visibility", "lucide:eye"),
    ("filter", "lucide:filter"),
    ("funnel", "lucide:filter"),
    ("download", "lucide:download"),
    ("upload", "lucide:upload"),
    ("refresh", "lucide:refresh-cw"),
    ("sync", "lucide:refresh-cw"),
    ("update", "lucide:refresh-cw"),
    ("repeat", "lucide:repeat"),
    ("cycle", "lucide:repeat"),
    ("loop", "lucide:repeat"),
    ("pencil", "lucide:pencil"),
    ("edit", "lucide:pencil"),
    ("write", "lucide:pencil"),
    ("trash", "lucide:trash-2"),
    ("delete", "lucide:trash-2"),
    ("plus", "lucide:plus"),
    ("add", "lucide:plus"),
    ("minus", "lucide:minus"),
    ("remove", "lucide:minus"),
    // Health and science
    ("heart-pulse", "lucide:heart-pulse"),
    ("health", "lucide:heart-pulse"),
    ("wellness", "lucide:heart-pulse"),
    ("stethoscope", "lucide:stethoscope"),
    ("medical", "lucide:stethoscope"),
    ("doctor", "lucide:stethoscope"),
    ("healthcare", "lucide:stethoscope"),
    ("hospital", "lucide:hospital"),
    ("flask", "lucide:flask-conical"),
    ("science", "lucide:flask-conical"),
    ("experiment", "lucide:flask-conical"),
    ("lab", "lucide:flask-conical"),
    ("microscope", "lucide:microscope"),
    ("research", "lucide:microscope"),
    ("atom", "lucide:atom"),
    ("physics", "lucide:atom"),
    ("dna", "lucide:dna"),
    ("biology", "lucide:dna"),
    ("genetics", "lucide:dna"),
    ("scale", "lucide:scale"),
    ("balance", "lucide:scale"),
    ("law", "lucide:scale"),
    ("legal", "lucide:scale"),
    ("justice", "lucide:scale"),
    ("compliance", "lucide:scale"),
    ("gavel", "lucide:gavel"),
    ("palette", "lucide:palette"),
    ("design", "lucide:palette"),
    ("art", "lucide:palette"),
    ("creative", "lucide:palette"),
    ("brush", "lucide:brush"),
    ("paint", "lucide:brush"),
];

/// Canonical lookup form of an icon name.
///
/// Lower-cases, trims, strips any `mdi/`, `lucide/`, `mingcute/` or
/// `feather/` prefix and turns underscores and whitespace into dashes.
/// Applying it twice gives the same result as applying it once.
pub fn normalize_icon_name(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let lowered = raw.to_lowercase();
    let mut rest = lowered.trim();
    while let Some(prefix) = NAMESPACE_PREFIX_RE.find(rest) {
        rest = rest[prefix.end()..].trim();
    }
    rest.chars()
        .map(|ch| if ch == '_' || ch.is_whitespace() { '-' } else { ch })
        .collect()
}

/// Exact-match lookup of a free-form icon name. No fuzzy matching.
pub fn resolve_icon(raw: &str) -> Option<IconRef> {
    if raw.is_empty() {
        return None;
    }
    let key = normalize_icon_name(raw);
    ICON_TABLE.get(key.as_str()).copied()
}

/// All table keys, in table order.
pub fn icon_keys() -> impl Iterator<Item = &'static str> {
    ICON_ENTRIES.iter().map(|(key, _)| *key)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconOptions {
    pub size: u32,
    pub fallback: String,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            size: 20,
            fallback: "\u{2713}".to_string(),
        }
    }
}

/// What an icon slot should display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IconView {
    Glyph { icon: IconRef, size: u32 },
    Fallback { text: String, size: u32 },
}

impl IconView {
    pub fn resolve(raw: &str, options: &IconOptions) -> Self {
        match resolve_icon(raw) {
            Some(icon) => IconView::Glyph {
                icon,
                size: options.size,
            },
            None => IconView::Fallback {
                text: options.fallback.clone(),
                size: options.size,
            },
        }
    }

    pub fn size(&self) -> u32 {
        match self {
            IconView::Glyph { size, .. } | IconView::Fallback { size, .. } => *size,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, IconView::Fallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_no_duplicate_keys() {
        assert_eq!(ICON_TABLE.len(), ICON_ENTRIES.len());
        assert!(ICON_TABLE.len() >= 180);
    }

    #[test]
    fn table_keys_are_normalized() {
        for key in icon_keys() {
            assert_eq!(normalize_icon_name(key), key);
        }
    }

    #[test]
    fn strips_namespaces_and_separators() {
        assert_eq!(normalize_icon_name("mdi/Robot"), "robot");
        assert_eq!(normalize_icon_name("lucide/brain"), "brain");
        assert_eq!(normalize_icon_name("MINGCUTE/chat"), "chat");
        assert_eq!(normalize_icon_name("feather/credit_card"), "credit-card");
        assert_eq!(normalize_icon_name("AI_Chip"), "ai-chip");
        assert_eq!(normalize_icon_name("  Thumbs Up "), "thumbs-up");
        assert_eq!(normalize_icon_name("other/robot"), "other/robot");
        assert_eq!(normalize_icon_name(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "mdi/mdi/Robot",
            " mdi/x ",
            "lucide/ feather/Zap",
            "MDI/",
            "__",
            "Ünïcode_Name",
            "a\tb\nc",
            "mingcute/ai_chip",
            "///",
        ];
        for sample in samples {
            let once = normalize_icon_name(sample);
            assert_eq!(normalize_icon_name(&once), once, "{sample:?}");
        }
    }

    #[test]
    fn synonyms_share_a_glyph() {
        assert_eq!(resolve_icon("money"), resolve_icon("dollar"));
        assert_eq!(resolve_icon("chat"), resolve_icon("message"));
        assert_eq!(resolve_icon("mdi/robot"), resolve_icon("bot"));
        assert_eq!(resolve_icon("dollar").map(IconRef::glyph), Some("dollar-sign"));
        assert!(IconRef::all().len() < ICON_ENTRIES.len());
    }

    #[test]
    fn misses_return_none() {
        assert!(resolve_icon("totally-unknown-xyz").is_none());
        assert!(resolve_icon("").is_none());
        assert!(resolve_icon("robo").is_none());
    }

    #[test]
    fn view_falls_back_on_miss() {
        let options = IconOptions::default();
        let view = IconView::resolve("nope", &options);
        assert_eq!(
            view,
            IconView::Fallback {
                text: "\u{2713}".to_string(),
                size: 20
            }
        );
        let view = IconView::resolve("ai_chip", &options);
        assert!(!view.is_fallback());
        assert_eq!(view.size(), 20);
    }
}
