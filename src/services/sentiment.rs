use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Errors raised by a sentiment capability
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("Sentiment analyzer unavailable: {0}")]
    Unavailable(String),
}

/// Text polarity capability
///
/// Implementations return a polarity in [-1, 1], where -1 is strongly
/// negative and 1 strongly positive. Text is passed with its original casing.
pub trait SentimentAnalyzer: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError>;
}

/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;

/// Scalar applied to a valence for each negation in the lookback window
const NEGATION_SCALAR: f64 = -0.74;

/// Valence added (or removed) by an intensifier in front of a word
const BOOSTER_INCREMENT: f64 = 0.293;

/// Valence added to an ALL-CAPS word in otherwise mixed-case text
const CAPS_INCREMENT: f64 = 0.733;

/// Added to the sum per exclamation mark, up to `MAX_EXCLAMATIONS`
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

/// Added per question mark when a text has two or three of them
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;

/// Weights on each side of a contrastive "but"
const BEFORE_BUT_SCALAR: f64 = 0.5;
const AFTER_BUT_SCALAR: f64 = 1.5;

/// How many preceding tokens are checked for negations and boosters
const LOOKBACK: usize = 3;

/// Damping of a booster's effect by distance (1, 2 or 3 tokens back)
const BOOSTER_DAMPING: [f64; LOOKBACK] = [1.0, 0.95, 0.9];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nope", "nobody", "nothing", "nowhere", "neither", "nor",
    "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "werent", "wont",
    "wouldnt", "couldnt", "shouldnt", "havent", "hasnt", "hadnt", "aint", "without", "hardly",
    "rarely", "seldom", "despite", "uh-uh",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOSTER_INCREMENT),
    ("amazingly", BOOSTER_INCREMENT),
    ("completely", BOOSTER_INCREMENT),
    ("considerably", BOOSTER_INCREMENT),
    ("deeply", BOOSTER_INCREMENT),
    ("definitely", BOOSTER_INCREMENT),
    ("enormously", BOOSTER_INCREMENT),
    ("entirely", BOOSTER_INCREMENT),
    ("especially", BOOSTER_INCREMENT),
    ("exceptionally", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("fully", BOOSTER_INCREMENT),
    ("genuinely", BOOSTER_INCREMENT),
    ("greatly", BOOSTER_INCREMENT),
    ("highly", BOOSTER_INCREMENT),
    ("hugely", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("intensely", BOOSTER_INCREMENT),
    ("majorly", BOOSTER_INCREMENT),
    ("more", BOOSTER_INCREMENT),
    ("most", BOOSTER_INCREMENT),
    ("particularly", BOOSTER_INCREMENT),
    ("purely", BOOSTER_INCREMENT),
    ("quite", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("remarkably", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("substantially", BOOSTER_INCREMENT),
    ("super", BOOSTER_INCREMENT),
    ("thoroughly", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("tremendously", BOOSTER_INCREMENT),
    ("truly", BOOSTER_INCREMENT),
    ("uber", BOOSTER_INCREMENT),
    ("unbelievably", BOOSTER_INCREMENT),
    ("unusually", BOOSTER_INCREMENT),
    ("utterly", BOOSTER_INCREMENT),
    ("very", BOOSTER_INCREMENT),
    ("almost", -BOOSTER_INCREMENT),
    ("barely", -BOOSTER_INCREMENT),
    ("fairly", -BOOSTER_INCREMENT),
    ("kinda", -BOOSTER_INCREMENT),
    ("kindof", -BOOSTER_INCREMENT),
    ("less", -BOOSTER_INCREMENT),
    ("little", -BOOSTER_INCREMENT),
    ("marginally", -BOOSTER_INCREMENT),
    ("occasionally", -BOOSTER_INCREMENT),
    ("partly", -BOOSTER_INCREMENT),
    ("scarcely", -BOOSTER_INCREMENT),
    ("slightly", -BOOSTER_INCREMENT),
    ("somewhat", -BOOSTER_INCREMENT),
    ("sorta", -BOOSTER_INCREMENT),
];

/// Emoticon valences, matched on the raw whitespace-separated token
const EMOTICONS: &[(&str, f64)] = &[
    (":)", 2.0),
    (":-)", 2.0),
    ("(:", 2.0),
    (":]", 1.7),
    (":d", 2.3),
    (":-d", 2.3),
    (";)", 0.9),
    (";-)", 1.0),
    ("xd", 2.7),
    (":p", 1.2),
    ("<3", 1.9),
    (":(", -1.9),
    (":-(", -1.9),
    ("):", -1.9),
    (":'(", -2.3),
    (":/", -1.4),
    (":|", -0.4),
    ("</3", -2.0),
];

/// Word valences on a -4..=4 scale
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("accomplished", 1.9),
    ("active", 1.3),
    ("admire", 2.1),
    ("adorable", 2.2),
    ("adore", 2.7),
    ("adventure", 1.3),
    ("adventurous", 1.3),
    ("affection", 2.4),
    ("affectionate", 2.0),
    ("agree", 1.5),
    ("alive", 1.6),
    ("amazing", 2.8),
    ("amused", 1.6),
    ("appreciate", 1.7),
    ("authentic", 1.5),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("beauty", 2.8),
    ("best", 3.2),
    ("better", 1.9),
    ("blessed", 2.9),
    ("bliss", 2.7),
    ("brave", 2.4),
    ("bright", 1.9),
    ("brilliant", 2.8),
    ("calm", 1.3),
    ("care", 2.2),
    ("carefree", 1.7),
    ("caring", 2.2),
    ("charming", 2.8),
    ("cheerful", 2.5),
    ("chill", 0.2),
    ("clever", 2.0),
    ("comfortable", 1.5),
    ("compassionate", 2.2),
    ("confident", 2.2),
    ("cool", 1.3),
    ("courageous", 2.4),
    ("cozy", 1.9),
    ("creative", 1.9),
    ("cuddle", 1.6),
    ("curious", 1.3),
    ("cute", 2.0),
    ("delight", 2.9),
    ("delighted", 2.3),
    ("delightful", 2.9),
    ("dream", 1.0),
    ("eager", 1.5),
    ("easygoing", 1.6),
    ("energetic", 1.9),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("enjoying", 2.4),
    ("enthusiastic", 1.9),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("excitement", 2.2),
    ("exciting", 2.2),
    ("fabulous", 2.4),
    ("faithful", 1.9),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("favourite", 2.0),
    ("fine", 0.8),
    ("fit", 1.5),
    ("free", 2.3),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("friendship", 1.9),
    ("fun", 2.3),
    ("funny", 1.9),
    ("generous", 2.3),
    ("gentle", 1.9),
    ("genuine", 1.8),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("grateful", 2.0),
    ("great", 3.1),
    ("happier", 2.4),
    ("happiest", 3.2),
    ("happily", 2.6),
    ("happiness", 2.6),
    ("happy", 2.7),
    ("harmony", 1.7),
    ("healthy", 1.7),
    ("heartfelt", 2.2),
    ("helpful", 1.8),
    ("honest", 2.3),
    ("honesty", 2.2),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("hug", 2.1),
    ("hugs", 2.2),
    ("humble", 1.1),
    ("humor", 1.1),
    ("humour", 2.1),
    ("inspire", 2.7),
    ("inspired", 2.2),
    ("inspiring", 1.8),
    ("interesting", 1.7),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("kind", 2.4),
    ("kindness", 2.0),
    ("laugh", 2.6),
    ("laughing", 2.2),
    ("laughter", 2.2),
    ("like", 1.5),
    ("liked", 1.8),
    ("likes", 1.8),
    ("lol", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("lover", 2.8),
    ("loves", 2.7),
    ("loving", 2.9),
    ("loyal", 2.1),
    ("loyalty", 2.5),
    ("lucky", 1.8),
    ("magic", 1.4),
    ("marvelous", 2.9),
    ("motivated", 1.9),
    ("nice", 1.8),
    ("open-minded", 1.6),
    ("optimism", 2.5),
    ("optimistic", 1.3),
    ("outgoing", 1.2),
    ("passion", 2.0),
    ("passionate", 2.4),
    ("peace", 2.5),
    ("peaceful", 2.2),
    ("perfect", 2.7),
    ("playful", 1.9),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("pleasure", 2.7),
    ("positive", 2.3),
    ("positivity", 2.3),
    ("pretty", 2.2),
    ("proud", 2.1),
    ("relax", 1.9),
    ("relaxed", 2.2),
    ("relaxing", 2.2),
    ("respect", 2.1),
    ("romance", 2.6),
    ("romantic", 1.7),
    ("safe", 1.9),
    ("satisfied", 1.8),
    ("sincere", 1.7),
    ("smart", 1.7),
    ("smile", 1.5),
    ("smiles", 1.5),
    ("smiling", 1.3),
    ("spontaneous", 1.0),
    ("strong", 2.3),
    ("success", 2.7),
    ("successful", 2.8),
    ("sunshine", 2.2),
    ("super", 2.9),
    ("support", 1.7),
    ("supportive", 1.2),
    ("sweet", 2.0),
    ("talented", 2.3),
    ("thankful", 2.7),
    ("thanks", 1.9),
    ("thoughtful", 1.6),
    ("thrilled", 1.9),
    ("trust", 2.3),
    ("trustworthy", 2.6),
    ("warm", 0.9),
    ("welcome", 2.0),
    ("win", 2.8),
    ("winning", 2.4),
    ("wise", 1.8),
    ("witty", 1.6),
    ("wonderful", 2.7),
    ("worthy", 1.9),
    ("wow", 2.8),
    ("yay", 2.4),
    ("yes", 1.7),
    // negative
    ("afraid", -2.0),
    ("aggressive", -0.6),
    ("alone", -1.0),
    ("anger", -2.7),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("anxiety", -0.7),
    ("anxious", -1.0),
    ("arrogant", -2.2),
    ("ashamed", -2.1),
    ("awful", -2.0),
    ("awkward", -0.6),
    ("bad", -2.5),
    ("bitter", -1.8),
    ("bored", -1.1),
    ("boring", -1.3),
    ("broke", -1.8),
    ("broken", -2.1),
    ("careless", -1.5),
    ("cheat", -2.6),
    ("cheater", -2.8),
    ("cheating", -2.6),
    ("clingy", -1.0),
    ("cold", -0.4),
    ("complain", -1.5),
    ("confused", -1.3),
    ("cruel", -2.8),
    ("cry", -2.1),
    ("crying", -2.1),
    ("damn", -1.7),
    ("dead", -3.3),
    ("depressed", -2.3),
    ("depressing", -1.6),
    ("desperate", -1.3),
    ("difficult", -1.5),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disgusting", -2.4),
    ("dishonest", -2.7),
    ("dislike", -1.6),
    ("distrust", -1.8),
    ("drama", -1.5),
    ("dramatic", -0.9),
    ("dull", -1.7),
    ("dumb", -2.3),
    ("empty", -0.8),
    ("enemy", -2.5),
    ("evil", -3.4),
    ("exhausted", -1.5),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fake", -2.1),
    ("fear", -2.2),
    ("fight", -1.6),
    ("fighting", -1.5),
    ("fool", -1.9),
    ("frustrated", -2.4),
    ("frustrating", -1.9),
    ("games", -0.2),
    ("ghost", -1.3),
    ("ghosted", -1.9),
    ("greedy", -1.3),
    ("grumpy", -2.2),
    ("guilty", -1.8),
    ("hard", -0.4),
    ("harsh", -1.9),
    ("hate", -2.7),
    ("hated", -3.2),
    ("hater", -1.8),
    ("haters", -2.2),
    ("hates", -1.9),
    ("hating", -2.3),
    ("heartbreak", -2.7),
    ("heartbroken", -3.3),
    ("hopeless", -2.0),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("ignorant", -1.1),
    ("ignore", -1.5),
    ("insecure", -1.8),
    ("irritating", -2.0),
    ("jealous", -2.0),
    ("jerk", -2.7),
    ("lame", -1.8),
    ("lazy", -1.4),
    ("liar", -3.1),
    ("liars", -2.4),
    ("lie", -1.6),
    ("lies", -1.8),
    ("lonely", -1.5),
    ("lonesome", -1.5),
    ("lose", -1.6),
    ("loser", -2.4),
    ("lost", -1.3),
    ("mad", -2.2),
    ("mean", -1.2),
    ("mess", -1.5),
    ("messy", -1.5),
    ("miserable", -2.2),
    ("miss", -0.6),
    ("moody", -1.5),
    ("nasty", -2.6),
    ("needy", -1.4),
    ("negative", -2.7),
    ("nervous", -1.1),
    ("pain", -2.3),
    ("painful", -1.9),
    ("pathetic", -2.7),
    ("petty", -0.8),
    ("players", -0.3),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("rejected", -1.5),
    ("rude", -2.0),
    ("sad", -2.1),
    ("scared", -1.9),
    ("selfish", -2.1),
    ("shallow", -0.9),
    ("shame", -2.1),
    ("shy", -1.0),
    ("sick", -2.3),
    ("sorry", -0.3),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("stressful", -2.3),
    ("stupid", -2.4),
    ("suck", -1.5),
    ("sucks", -1.5),
    ("suffer", -2.5),
    ("terrible", -2.1),
    ("tired", -1.9),
    ("toxic", -2.4),
    ("trouble", -1.7),
    ("ugly", -2.3),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("weak", -1.9),
    ("weird", -0.7),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("worthless", -1.9),
    ("wrong", -2.1),
];

/// One whitespace-separated token with its casing preserved
#[derive(Debug)]
struct Token<'a> {
    raw: &'a str,
    lower: String,
    emoticon: bool,
}

impl Token<'_> {
    /// All letters uppercase, e.g. "LOVE"
    fn is_shouted(&self) -> bool {
        !self.emoticon
            && self.raw.chars().any(char::is_alphabetic)
            && !self.raw.chars().any(char::is_lowercase)
    }

    fn is_negation(&self) -> bool {
        NEGATIONS.contains(&self.lower.as_str()) || self.lower.ends_with("n't")
    }
}

/// Lexicon-based polarity scorer in the VADER manner
///
/// Each scored word is adjusted for ALL-CAPS emphasis, preceding intensifiers
/// and negations, then weighted around a contrastive "but". The sum is
/// amplified by trailing `!`/`?` and squashed into [-1, 1] with
/// `s / sqrt(s^2 + 15)`.
pub struct LexiconSentiment {
    lexicon: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    emoticons: HashMap<&'static str, f64>,
}

impl LexiconSentiment {
    /// Build a fresh analyzer. Prefer [`LexiconSentiment::shared`] in services.
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            emoticons: EMOTICONS.iter().copied().collect(),
        }
    }

    /// Process-wide analyzer, built on first use
    ///
    /// Concurrent first callers race safely: exactly one builds the lexicon,
    /// the rest wait and receive the same instance.
    pub fn shared() -> Arc<LexiconSentiment> {
        static SHARED: OnceLock<Arc<LexiconSentiment>> = OnceLock::new();

        SHARED
            .get_or_init(|| {
                tracing::debug!(
                    "Building sentiment lexicon ({} words, {} emoticons)",
                    LEXICON.len(),
                    EMOTICONS.len()
                );
                Arc::new(LexiconSentiment::new())
            })
            .clone()
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        text.split_whitespace()
            .filter_map(|word| {
                let lowered = word.to_lowercase();
                if self.emoticons.contains_key(lowered.as_str()) {
                    return Some(Token {
                        raw: word,
                        lower: lowered,
                        emoticon: true,
                    });
                }

                let raw = word.trim_matches(|c: char| !(c.is_alphanumeric() || c == '\''));
                // single letters carry no sentiment and would skew the caps check
                (raw.chars().count() > 1).then(|| Token {
                    raw,
                    lower: raw.to_lowercase(),
                    emoticon: false,
                })
            })
            .collect()
    }

    fn valence_of(&self, token: &Token<'_>, next: Option<&Token<'_>>) -> Option<f64> {
        if token.emoticon {
            return self.emoticons.get(token.lower.as_str()).copied();
        }
        // "kind of" hedges, it does not praise
        if token.lower == "kind" && next.is_some_and(|n| n.lower == "of") {
            return None;
        }
        self.lexicon.get(token.lower.as_str()).copied()
    }

    fn score_tokens(&self, tokens: &[Token<'_>]) -> Vec<f64> {
        let shouted = tokens.iter().filter(|t| t.is_shouted()).count();
        let words = tokens.iter().filter(|t| !t.emoticon).count();
        let caps_differential = shouted > 0 && shouted < words;

        let mut valences = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let Some(base) = self.valence_of(token, tokens.get(i + 1)) else {
                valences.push(0.0);
                continue;
            };

            let mut valence = base;
            if caps_differential && token.is_shouted() {
                valence += CAPS_INCREMENT.copysign(valence);
            }

            let start = i.saturating_sub(LOOKBACK);
            let window = &tokens[start..i];

            for (previous, damping) in window.iter().rev().zip(BOOSTER_DAMPING) {
                if let Some(&boost) = self.boosters.get(previous.lower.as_str()) {
                    let mut boost = boost;
                    if caps_differential && previous.is_shouted() {
                        boost += CAPS_INCREMENT.copysign(boost);
                    }
                    // intensifiers push away from zero, dampeners toward it
                    valence += boost * damping * valence.signum();
                }
            }

            let negations = window.iter().filter(|t| t.is_negation()).count();
            valence *= NEGATION_SCALAR.powi(negations as i32);

            valences.push(valence);
        }

        if let Some(but) = tokens.iter().position(|t| t.lower == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                if i < but {
                    *valence *= BEFORE_BUT_SCALAR;
                } else if i > but {
                    *valence *= AFTER_BUT_SCALAR;
                }
            }
        }

        valences
    }
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer for LexiconSentiment {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        let tokens = self.tokenize(text);
        let sum: f64 = self.score_tokens(&tokens).iter().sum();

        if sum == 0.0 {
            return Ok(0.0);
        }

        let sum = sum + punctuation_emphasis(text).copysign(sum);
        let compound = sum / (sum * sum + ALPHA).sqrt();
        Ok(compound.clamp(-1.0, 1.0))
    }
}

/// Extra intensity from exclamation and question marks
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => MAX_QUESTION_EMPHASIS,
    };

    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}
