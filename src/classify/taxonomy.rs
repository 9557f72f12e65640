// Category and tag inference from article titles.
//
// Both are ordered rule tables: each rule is a label plus a case-insensitive
// pattern (and optionally a companion pattern that must also match). Every
// rule is evaluated independently; all matching labels are kept in table
// order with duplicates removed. Explicit values from the CSV always win
// over inference when they are non-empty after cleaning.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex_lite::Regex;

use super::signals::{self, BRAND_MENTION};

pub const PODCAST: &str = "Podcast";
pub const STABLECOINS: &str = "Stablecoins";
pub const NEW_LISTINGS: &str = "New Listings";
pub const PARTNERSHIPS: &str = "Partnerships";
pub const PRODUCT_UPDATES: &str = "Product Updates";
pub const ANNOUNCEMENTS: &str = "Announcements";
pub const LEARNING_HUB: &str = "Learning Hub";

/// One entry in a classification table.
pub struct KeywordRule {
    pub label: &'static str,
    pattern: Option<Regex>,
    requires: Option<&'static LazyLock<Option<Regex>>>,
}

impl KeywordRule {
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            pattern: Regex::new(&format!("(?i){pattern}")).ok(),
            requires: None,
        }
    }

    /// Only fire when `companion` also matches the title.
    fn requiring(mut self, companion: &'static LazyLock<Option<Regex>>) -> Self {
        self.requires = Some(companion);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.pattern.is_some() && self.requires.is_none_or(|c| c.is_some())
    }

    pub fn matches(&self, title: &str) -> bool {
        let primary = self.pattern.as_ref().is_some_and(|re| re.is_match(title));
        primary
            && self
                .requires
                .is_none_or(|c| c.as_ref().is_some_and(|re| re.is_match(title)))
    }
}

const STABLECOIN_PATTERN: &str =
    r"\b(?:stable ?coins?|usdt|usdc|dai|pyusd|eurc|busd|tusd|fdusd|rlusd|usde)\b";

static CATEGORY_RULES: LazyLock<Vec<KeywordRule>> = LazyLock::new(|| {
    vec![
        KeywordRule::new(PODCAST, r"\b(?:podcasts?|episode|ep\.? ?\d+|fireside chat)\b"),
        KeywordRule::new(STABLECOINS, STABLECOIN_PATTERN),
        KeywordRule::new(
            NEW_LISTINGS,
            r"\b(?:new (?:token |coin )?listings?|now listed|newly listed|lists \w+|listing alert)\b",
        ),
        KeywordRule::new(PARTNERSHIPS, signals::PARTNERSHIP_PATTERN).requiring(&BRAND_MENTION),
        KeywordRule::new(
            PRODUCT_UPDATES,
            r"\b(?:new features?|introduc(?:es|ing)|product updates?|release notes|now live|rolls? out|launch(?:es|ed)?|sdk|api|widget|checkout|dashboard)\b",
        ),
        KeywordRule::new(
            ANNOUNCEMENTS,
            r"\b(?:announc(?:e|es|ed|ement|ements|ing)|licen[cs](?:e|es|ed|ing)|registration|registered|regulat(?:ory|ion|ions|ed)|approval|approved|funding|fundrais(?:e|ing)|raises?|series [a-d]|acquir(?:es|ed)|acquisition|milestone|appoints?)\b",
        ),
        KeywordRule::new(
            LEARNING_HUB,
            r"(?:\bhow to\b|\bwhat (?:is|are)\b|\bexplained\b|\bguide\b|\bvs\.?(?:\s|$)|\bversus\b|\bcomparison\b|\bcompared\b|\btop \d+\b|\bbest\b|\b\d+ (?:ways|tips|things|reasons|steps)\b|\bunderstanding\b|\bdecoding\b|\b101\b|\bbeginners?\b|\bbeginner['’]s\b|\bintroduction to\b|\bwhy\b)",
        ),
    ]
});

/// Generic crypto/web3 vocabulary for the fallback into the learning bucket.
static CRYPTO_VOCABULARY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:crypto\w*|bitcoin|btc|ethereum|eth|blockchain|web3|defi|nfts?|tokens?|wallets?|dao|metaverse|altcoins?|layer ?2|on-?ramps?|off-?ramps?|gas fees?|smart contracts?|staking)\b",
    )
    .ok()
});

static TAG_RULES: LazyLock<Vec<KeywordRule>> = LazyLock::new(|| {
    vec![
        // Product features
        KeywordRule::new("On-Ramp", r"\b(?:on-?ramps?|buy crypto|fiat[- ]to[- ]crypto)\b"),
        KeywordRule::new(
            "Off-Ramp",
            r"\b(?:off-?ramps?|sell crypto|crypto[- ]to[- ]fiat|cash out)\b",
        ),
        KeywordRule::new("NFT Checkout", r"\bnft checkout\b"),
        KeywordRule::new("NFTs", r"\bnfts?\b"),
        KeywordRule::new("Stablecoins", STABLECOIN_PATTERN),
        // Chains and assets
        KeywordRule::new("Bitcoin", r"\b(?:bitcoin|btc)\b"),
        KeywordRule::new("Ethereum", r"\b(?:ethereum|eth)\b"),
        KeywordRule::new("Solana", r"\b(?:solana|sol)\b"),
        KeywordRule::new("Polygon", r"\b(?:polygon|matic)\b"),
        KeywordRule::new(
            "Layer 2",
            r"\b(?:layer[- ]?2|l2s?|rollups?|arbitrum|optimism|zksync|starknet)\b",
        ),
        KeywordRule::new("DeFi", r"\b(?:defi|decentrali[sz]ed finance)\b"),
        KeywordRule::new("Wallets", r"\bwallets?\b"),
        // Compliance and security
        KeywordRule::new("KYC", r"\b(?:kyc|know your customer|identity verification)\b"),
        KeywordRule::new(
            "Compliance",
            r"\b(?:complian(?:ce|t)|regulat\w*|licen[cs]\w*|mica|aml|travel rule)\b",
        ),
        KeywordRule::new(
            "Security",
            r"\b(?:secur(?:e|ity)|scams?|fraud|hacks?|phishing|private keys?|seed phrases?)\b",
        ),
        // Regional expansion
        KeywordRule::new(
            "Europe",
            r"\b(?:europe(?:an)?|eu|uk|sepa|germany|france|spain|italy|netherlands)\b",
        ),
        KeywordRule::new(
            "LATAM",
            r"\b(?:latam|latin america|brazil|mexico|argentina|colombia|pix)\b",
        ),
        KeywordRule::new(
            "Asia",
            r"\b(?:asia|apac|india|japan|singapore|philippines|indonesia|vietnam|korea|hong kong)\b",
        ),
        KeywordRule::new("Africa", r"\b(?:africa|nigeria|kenya|ghana)\b"),
        KeywordRule::new("United States", r"\b(?:usa|united states|u\.s\.)"),
        // Partner brands
        KeywordRule::new("MetaMask", r"\bmetamask\b"),
        KeywordRule::new("Ledger", r"\bledger\b"),
        KeywordRule::new("Coinbase", r"\bcoinbase\b"),
        KeywordRule::new("Binance", r"\bbinance\b"),
        KeywordRule::new("Trust Wallet", r"\btrust wallet\b"),
        KeywordRule::new("Visa", r"\bvisa\b"),
        KeywordRule::new("Apple Pay", r"\bapple pay\b"),
        KeywordRule::new("Google Pay", r"\bgoogle pay\b"),
        // Format markers
        KeywordRule::new("How-To", r"\b(?:how to|step[- ]by[- ]step|tutorial)\b"),
        KeywordRule::new(
            "Crypto 101",
            r"(?:\b101\b|\bbeginners?\b|\bbeginner['’]s\b|\bwhat (?:is|are)\b|\bexplained\b)",
        ),
        KeywordRule::new("Podcast", r"\b(?:podcasts?|fireside chat)\b"),
        KeywordRule::new(
            "Price Prediction",
            r"\b(?:price predictions?|price forecasts?|price outlook)\b",
        ),
    ]
});

/// Loose tag spellings mapped to one canonical label per concept.
/// Keys are lowercase with single spaces.
const TAG_SYNONYMS: &[(&str, &str)] = &[
    ("how to", "How-To"),
    ("how-to", "How-To"),
    ("howto", "How-To"),
    ("how tos", "How-To"),
    ("how-tos", "How-To"),
    ("tutorial", "How-To"),
    ("tutorials", "How-To"),
    ("101", "Crypto 101"),
    ("crypto101", "Crypto 101"),
    ("crypto 101", "Crypto 101"),
    ("crypto-101", "Crypto 101"),
    ("beginner", "Crypto 101"),
    ("beginners", "Crypto 101"),
    ("nft", "NFTs"),
    ("nfts", "NFTs"),
    ("nft's", "NFTs"),
    ("nft checkout", "NFT Checkout"),
    ("nft-checkout", "NFT Checkout"),
    ("stablecoin", "Stablecoins"),
    ("stablecoins", "Stablecoins"),
    ("stable coin", "Stablecoins"),
    ("stable coins", "Stablecoins"),
    ("onramp", "On-Ramp"),
    ("on-ramp", "On-Ramp"),
    ("on ramp", "On-Ramp"),
    ("onramps", "On-Ramp"),
    ("on-ramps", "On-Ramp"),
    ("offramp", "Off-Ramp"),
    ("off-ramp", "Off-Ramp"),
    ("off ramp", "Off-Ramp"),
    ("offramps", "Off-Ramp"),
    ("off-ramps", "Off-Ramp"),
    ("kyc", "KYC"),
    ("k.y.c.", "KYC"),
    ("defi", "DeFi"),
    ("de-fi", "DeFi"),
    ("layer 2", "Layer 2"),
    ("layer-2", "Layer 2"),
    ("layer2", "Layer 2"),
    ("l2", "Layer 2"),
    ("l2s", "Layer 2"),
    ("btc", "Bitcoin"),
    ("bitcoin", "Bitcoin"),
    ("eth", "Ethereum"),
    ("ethereum", "Ethereum"),
    ("sol", "Solana"),
    ("solana", "Solana"),
    ("matic", "Polygon"),
    ("polygon", "Polygon"),
    ("wallet", "Wallets"),
    ("wallets", "Wallets"),
    ("metamask", "MetaMask"),
    ("meta mask", "MetaMask"),
    ("trustwallet", "Trust Wallet"),
    ("trust wallet", "Trust Wallet"),
    ("podcast", "Podcast"),
    ("podcasts", "Podcast"),
    ("security", "Security"),
    ("compliance", "Compliance"),
    ("regulation", "Compliance"),
    ("regulations", "Compliance"),
    ("latam", "LATAM"),
    ("latin america", "LATAM"),
    ("price prediction", "Price Prediction"),
    ("price predictions", "Price Prediction"),
];

static TAG_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| TAG_SYNONYMS.iter().copied().collect());

/// The category table in evaluation order.
pub fn category_rules() -> &'static [KeywordRule] {
    &CATEGORY_RULES
}

/// The tag table in evaluation order.
pub fn tag_rules() -> &'static [KeywordRule] {
    &TAG_RULES
}

/// Infer categories from a title. Never returns an empty list.
pub fn infer_categories(title: &str) -> Vec<String> {
    let matched = apply_rules(category_rules(), title);
    if !matched.is_empty() {
        return matched;
    }

    let fallback = if signals::mentions_brand(title) {
        PARTNERSHIPS
    } else if CRYPTO_VOCABULARY
        .as_ref()
        .is_some_and(|re| re.is_match(title))
    {
        LEARNING_HUB
    } else {
        ANNOUNCEMENTS
    };
    vec![fallback.to_string()]
}

/// Infer canonical tags from a title. May be empty.
pub fn infer_tags(title: &str) -> Vec<String> {
    canonicalize_tags(apply_rules(tag_rules(), title))
}

/// Map a tag to its canonical spelling, or return it trimmed when unknown.
pub fn canonical_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    let key = trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    match TAG_CANONICAL.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => trimmed.to_string(),
    }
}

/// Canonicalize and deduplicate a tag list, keeping first-seen order.
pub fn canonicalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dedup_labels(tags.into_iter().map(|t| canonical_tag(t.as_ref())))
}

/// Split an explicit CSV cell ("Learning Hub, Stablecoins") into labels.
///
/// Accepts `,`, `;` and `|` as separators. Empty entries are dropped and
/// duplicates removed case-insensitively, keeping the first spelling.
pub fn split_labels(cell: &str) -> Vec<String> {
    dedup_labels(cell.split([',', ';', '|']).map(str::to_string))
}

/// Trim, drop empties and remove case-insensitive duplicates.
fn dedup_labels<I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for label in labels {
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        if seen.insert(label.to_lowercase()) {
            out.push(label.to_string());
        }
    }
    out
}

fn apply_rules(rules: &[KeywordRule], title: &str) -> Vec<String> {
    dedup_labels(
        rules
            .iter()
            .filter(|rule| rule.matches(title))
            .map(|rule| rule.label.to_string()),
    )
}
