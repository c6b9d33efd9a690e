use crate::{Category, Classification, Classifier};

/// Confidence reported for every keyword classification.
pub const DEFAULT_CONFIDENCE: f64 = 0.98;

/// Keywords that select one category.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRule {
  pub category: Category,
  pub keywords: Vec<String>,
}

impl KeywordRule {
  pub fn new(category: Category, keywords: &[&str]) -> Self {
    Self {
      category,
      keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
  }

  fn matches(&self, text: &str) -> bool {
    self.keywords.iter().any(|k| text.contains(k.as_str()))
  }
}

/// Case-sensitive substring matcher.
///
/// Rules are tested in order and the first rule with a keyword contained in
/// the text wins. Text matching no rule gets the fallback category.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
  rules: Vec<KeywordRule>,
  fallback: Category,
}

impl KeywordClassifier {
  pub fn new(rules: Vec<KeywordRule>, fallback: Category) -> Self {
    Self { rules, fallback }
  }

  pub fn rules(&self) -> &[KeywordRule] {
    &self.rules
  }
}

impl Default for KeywordClassifier {
  fn default() -> Self {
    Self::new(
      vec![
        KeywordRule::new(Category::Weather, &["气温", "天气"]),
        KeywordRule::new(Category::News, &["新闻", "资讯"]),
      ],
      Category::Data,
    )
  }
}

impl Classifier for KeywordClassifier {
  fn classify(&self, text: &str) -> Classification {
    let category = self
      .rules
      .iter()
      .find(|rule| rule.matches(text))
      .map(|rule| rule.category)
      .unwrap_or(self.fallback);

    Classification {
      category,
      confidence: DEFAULT_CONFIDENCE,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::classify;

  #[test]
  fn test_weather_keywords() {
    assert_eq!(classify("帮我查一下北京未来三天的气温"), Category::Weather);
    assert_eq!(classify("明天天气怎么样"), Category::Weather);
  }

  #[test]
  fn test_news_keywords() {
    assert_eq!(classify("抓取最近的国内 AI 新闻"), Category::News);
    assert_eq!(classify("看看科技资讯"), Category::News);
  }

  #[test]
  fn test_fallback_to_data() {
    assert_eq!(classify("随便聊聊"), Category::Data);
    assert_eq!(classify(""), Category::Data);
  }

  #[test]
  fn test_weather_wins_over_news() {
    assert_eq!(classify("今天的天气新闻"), Category::Weather);
    assert_eq!(classify("新闻里说气温会下降"), Category::Weather);
  }

  #[test]
  fn test_matching_is_case_sensitive() {
    let classifier = KeywordClassifier::new(
      vec![KeywordRule::new(Category::News, &["News"])],
      Category::Data,
    );

    assert_eq!(classifier.classify("latest News").category, Category::News);
    assert_eq!(classifier.classify("latest news").category, Category::Data);
  }

  #[test]
  fn test_classification_is_idempotent() {
    let classifier = KeywordClassifier::default();
    for text in ["气温", "新闻", "随便聊聊", ""] {
      assert_eq!(classifier.classify(text), classifier.classify(text));
    }
  }

  #[test]
  fn test_reports_fixed_confidence() {
    let classification = KeywordClassifier::default().classify("天气");
    assert_eq!(classification.confidence, DEFAULT_CONFIDENCE);
  }

  #[test]
  fn test_category_wire_name() {
    assert_eq!(
      serde_json::to_string(&Category::Weather).unwrap(),
      "\"weather\""
    );
    assert_eq!(Category::News.to_string(), "news");
  }
}
