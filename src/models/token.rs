use serde::{Deserialize, Serialize};

/// Coarse tag the annotator assigns to punctuation
pub const PUNCT: &str = "PUNCT";

/// Placeholder for tokens without children in the dependency descriptor
pub const NO_CHILDREN: &str = "-";

/// Placeholder for tokens whose embedding is the null vector
pub const UNKNOWN_VECTOR: &str = "#";

/// Token produced by the external NLP annotator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpToken {
    /// Surface form as it appears in the sentence
    pub text: String,
    /// Coarse part-of-speech tag (e.g. "NOUN")
    pub pos: String,
    /// Fine-grained tag (e.g. "NN")
    pub tag: String,
    /// Dependency relation label
    pub dep: String,
    /// Surface form of the syntactic head
    pub head: String,
    /// Surface forms of the syntactic children, in sentence order
    #[serde(default)]
    pub children: Vec<String>,
    pub lemma: String,
    #[serde(default)]
    pub is_stop: bool,
    /// Word embedding; all zeros when the model does not know the word
    #[serde(default)]
    pub vector: Vec<f32>,
}

impl NlpToken {
    pub fn is_punct(&self) -> bool {
        self.pos == PUNCT
    }

    /// Flattened `"<dep>;<HEAD>;<children>"` encoding of the token's relation
    /// to its head and its alphanumeric children
    pub fn dependency_descriptor(&self) -> String {
        let children: Vec<&str> = self
            .children
            .iter()
            .map(String::as_str)
            .filter(|c| is_alphanumeric(c))
            .collect();
        let children = if children.is_empty() {
            NO_CHILDREN.to_string()
        } else {
            children.join(",")
        };
        format!("{};{};{}", self.dep, self.head.to_uppercase(), children)
    }

    /// Embedding as comma-joined decimals, or `#` for a null vector
    pub fn vector_field(&self) -> String {
        let magnitude: f32 = self.vector.iter().map(|x| x.abs()).sum();
        if magnitude > 0.0 {
            self.vector
                .iter()
                .map(|&x| format_decimal(x))
                .collect::<Vec<_>>()
                .join(",")
        } else {
            UNKNOWN_VECTOR.to_string()
        }
    }

    /// Stop-word flag as written to the annotation files
    pub fn stop_field(&self) -> String {
        if self.is_stop { "True" } else { "False" }.to_string()
    }
}

fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

/// Shortest decimal representation, keeping a fractional part ("0.0", "0.1")
fn format_decimal(x: f32) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

#[cfg(test)]
pub(crate) fn token(text: &str, pos: &str, tag: &str) -> NlpToken {
    NlpToken {
        text: text.to_string(),
        pos: pos.to_string(),
        tag: tag.to_string(),
        dep: "ROOT".to_string(),
        head: text.to_string(),
        children: vec![],
        lemma: text.to_lowercase(),
        is_stop: false,
        vector: vec![0.5, -0.25, 0.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_descriptor_with_children() {
        let mut t = token("sieht", "VERB", "VVFIN");
        t.dep = "ROOT".to_string();
        t.head = "sieht".to_string();
        t.children = vec!["Forrest".to_string(), "Jenny".to_string(), ".".to_string()];

        assert_eq!(t.dependency_descriptor(), "ROOT;SIEHT;Forrest,Jenny");
    }

    #[test]
    fn test_dependency_descriptor_without_children() {
        let mut t = token("Jenny", "PROPN", "NE");
        t.dep = "oa".to_string();
        t.head = "sieht".to_string();
        t.children = vec!["!".to_string()];

        assert_eq!(t.dependency_descriptor(), "oa;SIEHT;-");
    }

    #[test]
    fn test_vector_field_null_vector() {
        let mut t = token("Bubba", "PROPN", "NE");
        t.vector = vec![0.0, 0.0, 0.0];
        assert_eq!(t.vector_field(), "#");

        t.vector = vec![];
        assert_eq!(t.vector_field(), "#");
    }

    #[test]
    fn test_vector_field_values() {
        let mut t = token("Bubba", "PROPN", "NE");
        t.vector = vec![0.1, 0.0, 0.0];
        assert_eq!(t.vector_field(), "0.1,0.0,0.0");

        t.vector = vec![-1.0, 2.5];
        assert_eq!(t.vector_field(), "-1.0,2.5");
    }

    #[test]
    fn test_parse_token_json() {
        let json = r#"{
            "text": "Lauf",
            "pos": "VERB",
            "tag": "VVIMP",
            "dep": "ROOT",
            "head": "Lauf",
            "children": ["Forrest", "!"],
            "lemma": "laufen",
            "is_stop": false,
            "vector": [0.25, 0.0]
        }"#;

        let t: NlpToken = serde_json::from_str(json).unwrap();
        assert_eq!(t.text, "Lauf");
        assert_eq!(t.lemma, "laufen");
        assert_eq!(t.children.len(), 2);
        assert_eq!(t.stop_field(), "False");
        assert!(!t.is_punct());
    }
}
