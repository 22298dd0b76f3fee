//! Domain lexicon: keyword and synonym tables as swappable data.
//!
//! Defaults are tuned for Chinese document QA and hardcoded below; the whole
//! table can be overridden via TOML instead of branching per language feature.

use serde::{Deserialize, Serialize};

/// One phrase-to-synonyms substitution rule, applied in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymRule {
    pub phrase: String,
    pub synonyms: Vec<String>,
}

impl SynonymRule {
    fn new(phrase: &str, synonyms: &[&str]) -> Self {
        Self {
            phrase: phrase.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Fixed keyword/synonym tables driving expansion and classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Phrase → synonym substitutions for query expansion.
    pub synonyms: Vec<SynonymRule>,
    /// Function words removed from keyword-focused and lexical-rescore tokens.
    pub stopwords: Vec<String>,
    /// Coordinating-conjunction groups; each group splits the question
    /// independently during decomposition.
    pub conjunction_groups: Vec<Vec<String>>,
    /// Phrases marking a listing-style question for generalization.
    pub generalization_triggers: Vec<String>,
    /// Listing markers stripped when generalizing a question.
    pub listing_markers: Vec<String>,
    /// Suffixes appended to the generalized form.
    pub generalization_suffixes: Vec<String>,
    /// Markers stripped when building the broadened supplement query.
    pub supplement_markers: Vec<String>,
    /// Keywords classifying a question as listing-style.
    pub listing_keywords: Vec<String>,
    /// Keywords classifying a question as a precision lookup.
    pub precision_keywords: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            synonyms: vec![
                SynonymRule::new("有哪些", &["包括", "涵盖", "包含", "由"]),
                SynonymRule::new("是什么", &["定义", "含义", "解释", "说明"]),
                SynonymRule::new("怎么", &["如何", "方式", "方法", "步骤"]),
                SynonymRule::new("为什么", &["原因", "因素", "原由"]),
                SynonymRule::new("特点", &["特性", "属性", "性质", "特征"]),
                SynonymRule::new("优势", &["优点", "好处", "利益", "长处"]),
                SynonymRule::new("劣势", &["缺点", "不足", "问题", "弱点"]),
            ],
            stopwords: strings(&["的", "是", "在", "和", "与", "或"]),
            conjunction_groups: vec![
                strings(&["和", "与", "及"]),
                strings(&["或"]),
            ],
            generalization_triggers: strings(&["有哪些", "包括"]),
            listing_markers: strings(&["有哪些", "包括", "分别是", "都有"]),
            generalization_suffixes: strings(&["的分类", "的类型"]),
            supplement_markers: strings(&["有哪些", "包括", "所有"]),
            listing_keywords: strings(&[
                "有哪些", "包括", "所有", "列举", "分为", "几个", "几种", "星级",
            ]),
            precision_keywords: strings(&["是什么", "定义", "具体指", "含义"]),
        }
    }
}

impl Lexicon {
    /// Load an overriding lexicon from TOML.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.iter().any(|s| s == token)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
