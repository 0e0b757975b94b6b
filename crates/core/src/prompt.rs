//! Prompt rendering.
//!
//! One parameterised template serves every (language, query type) pair. Per-language text lives
//! in a static `Locale` table and each query type selects a `Section` from it, so adding a
//! language means adding a table rather than another branch.
//!
//! Layout of a rendered prompt:
//! ```text
//! <role line>
//! <profile heading, with age>
//! - <allergies label>: <list or None>
//! - <conditions label>: <list or None>
//!
//! <subject line quoting the item>
//! <checklist intro + 5 numbered questions, or an open instruction>
//!
//! <answer format instruction>
//! ```
//!
//! The item is interpolated verbatim. It is not escaped, so callers can steer the model through
//! it; intake only bounds its length.

use crate::profile::Profile;
use crate::query::{Language, PromptRequest, QueryType};
use std::fmt;

/// Rendered prompt text. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText(String);

impl PromptText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PromptText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Text wrapped around an interpolated value: `before{value}after`.
struct Around {
    before: &'static str,
    after: &'static str,
}

impl Around {
    fn wrap(&self, out: &mut String, value: &str) {
        out.push_str(self.before);
        out.push_str(value);
        out.push_str(self.after);
    }
}

enum Section {
    /// A fixed list of five questions answered point by point.
    Checklist {
        subject: Around,
        intro: &'static str,
        questions: [&'static str; 5],
        answer_format: &'static str,
    },
    /// A free question answered as bullets.
    Open {
        subject: Around,
        instruction: &'static str,
    },
}

struct Locale {
    role: &'static str,
    /// Heading that carries the age.
    heading: Around,
    /// `Some` when the age gets its own bullet under the heading.
    age_label: Option<&'static str>,
    allergies_label: &'static str,
    conditions_label: &'static str,
    medicine: Section,
    food: Section,
    general: Section,
}

impl Locale {
    fn section(&self, query_type: QueryType) -> &Section {
        match query_type {
            QueryType::Medicine => &self.medicine,
            QueryType::Food => &self.food,
            QueryType::General => &self.general,
        }
    }
}

static ENGLISH: Locale = Locale {
    role: "You are a careful health assistant. Tailor the answer to this person.",
    heading: Around {
        before: "Profile:",
        after: "",
    },
    age_label: Some("Age"),
    allergies_label: "Allergies",
    conditions_label: "Conditions",
    medicine: Section::Checklist {
        subject: Around {
            before: "Is the medicine \"",
            after: "\" suitable for this person?",
        },
        intro: "Please answer in these points:",
        questions: [
            "Is it safe?",
            "Any potential side effects?",
            "When should it be avoided?",
            "Alternative medicines?",
            "Additional advice.",
        ],
        answer_format: "Reply in 5 to 6 numbered points only, one short sentence each. \
                 Keep the response simple and clear.",
    },
    food: Section::Checklist {
        subject: Around {
            before: "Is \"",
            after: "\" a good food item for this person?",
        },
        intro: "Please respond in points:",
        questions: [
            "Is it beneficial?",
            "Any harmful effects?",
            "Quantity or caution?",
            "Better alternatives?",
            "Additional advice.",
        ],
        answer_format: "Reply in 5 to 6 numbered points only, one short sentence each. \
                 Keep the language simple and clear.",
    },
    general: Section::Open {
        subject: Around {
            before: "User question: \"",
            after: "\"",
        },
        instruction: "Please answer considering their profile, in clear bullet points.",
    },
};

static HINDI: Locale = Locale {
    role: "आप एक सावधान स्वास्थ्य सहायक हैं। उत्तर इस व्यक्ति के अनुसार दें।",
    heading: Around {
        before: "एक ",
        after: " वर्षीय व्यक्ति की प्रोफ़ाइल:",
    },
    age_label: None,
    allergies_label: "एलर्जी",
    conditions_label: "स्थितियाँ",
    medicine: Section::Checklist {
        subject: Around {
            before: "दवा \"",
            after: "\" इस व्यक्ति के लिए उपयुक्त है?",
        },
        intro: "कृपया बिंदुओं में उत्तर दें:",
        questions: [
            "क्या यह सुरक्षित है?",
            "संभावित साइड इफेक्ट?",
            "किन स्थितियों में टालना चाहिए?",
            "वैकल्पिक दवाएं?",
            "अतिरिक्त सलाह।",
        ],
        answer_format: "केवल 5 से 6 क्रमांकित बिंदुओं में उत्तर दें, हर बिंदु एक छोटा वाक्य हो। \
                 भाषा सरल और स्पष्ट रखें।",
    },
    food: Section::Checklist {
        subject: Around {
            before: "\"",
            after: "\" नामक भोजन इस व्यक्ति के लिए कैसा है?",
        },
        intro: "कृपया नीचे बिंदुओं में बताएं:",
        questions: [
            "क्या यह लाभकारी है?",
            "कोई नकारात्मक प्रभाव?",
            "विशेष ध्यान या मात्रा?",
            "बेहतर विकल्प?",
            "अतिरिक्त सलाह।",
        ],
        answer_format: "केवल 5 से 6 क्रमांकित बिंदुओं में उत्तर दें, हर बिंदु एक छोटा वाक्य हो। \
                 भाषा सरल और स्पष्ट रखें।",
    },
    general: Section::Open {
        subject: Around {
            before: "उपयोगकर्ता का प्रश्न: \"",
            after: "\"",
        },
        instruction: "कृपया प्रोफ़ाइल को ध्यान में रखते हुए मुख्य बिंदुओं में उत्तर दें।",
    },
};

fn locale(language: Language) -> &'static Locale {
    match language {
        Language::En => &ENGLISH,
        Language::Hi => &HINDI,
    }
}

/// Render the prompt for one request. Pure and infallible.
pub fn render(req: &PromptRequest) -> PromptText {
    let locale = locale(req.language);
    let mut out = String::new();

    out.push_str(locale.role);
    out.push('\n');
    push_profile(&mut out, locale, &req.profile);
    out.push('\n');

    match locale.section(req.query_type) {
        Section::Checklist {
            subject,
            intro,
            questions,
            answer_format,
        } => {
            subject.wrap(&mut out, &req.item);
            out.push('\n');
            out.push_str(intro);
            out.push('\n');
            for (n, question) in questions.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", n + 1, question));
            }
            out.push('\n');
            out.push_str(answer_format);
        }
        Section::Open {
            subject,
            instruction,
        } => {
            subject.wrap(&mut out, &req.item);
            out.push('\n');
            out.push_str(instruction);
        }
    }
    out.push('\n');

    PromptText(out)
}

fn push_profile(out: &mut String, locale: &Locale, profile: &Profile) {
    let age = profile.age.to_string();
    match locale.age_label {
        Some(label) => {
            locale.heading.wrap(out, "");
            out.push_str(&format!("\n- {label}: {age}\n"));
        }
        None => {
            locale.heading.wrap(out, &age);
            out.push('\n');
        }
    }
    out.push_str(&format!(
        "- {}: {}\n",
        locale.allergies_label,
        profile.allergy_list()
    ));
    out.push_str(&format!(
        "- {}: {}\n",
        locale.conditions_label,
        profile.condition_list()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query_type: QueryType, item: &str, language: Language) -> PromptRequest {
        PromptRequest {
            query_type,
            item: item.into(),
            language,
            profile: Profile {
                age: 42,
                allergies: vec!["Ibuprofen".into(), "Shellfish".into()],
                conditions: vec!["Asthma".into(), "High Cholesterol".into()],
            },
        }
    }

    #[test]
    fn english_medicine_prompt_embeds_profile_and_item() {
        let prompt = render(&request(QueryType::Medicine, "Aspirin", Language::En));
        let text = prompt.as_str();

        assert!(text.contains("Age: 42"));
        assert!(text.contains("Allergies: Ibuprofen, Shellfish"));
        assert!(text.contains("Conditions: Asthma, High Cholesterol"));
        assert!(text.contains("Is the medicine \"Aspirin\" suitable for this person?"));
        assert!(text.contains("1. Is it safe?"));
        assert!(text.contains("5. Additional advice."));
        assert!(text.contains("5 to 6 numbered points"));
    }

    #[test]
    fn hindi_prompt_localises_the_age_heading() {
        let prompt = render(&request(QueryType::Food, "हल्दी", Language::Hi));
        let text = prompt.as_str();

        assert!(text.contains("एक 42 वर्षीय व्यक्ति की प्रोफ़ाइल:"));
        assert!(text.contains("- एलर्जी: Ibuprofen, Shellfish"));
        assert!(text.contains("\"हल्दी\" नामक भोजन"));
        assert!(text.contains("1. क्या यह लाभकारी है?"));
        assert!(!text.contains("Age:"));
    }

    #[test]
    fn general_prompt_asks_for_bullets_without_checklist() {
        let prompt = render(&request(QueryType::General, "headache", Language::En));
        let text = prompt.as_str();

        assert!(text.contains("User question: \"headache\""));
        assert!(text.contains("clear bullet points"));
        assert!(!text.contains("1. "));
    }

    #[test]
    fn empty_lists_render_as_none() {
        let mut req = request(QueryType::Medicine, "Paracetamol", Language::En);
        req.profile = Profile::default();
        let prompt = render(&req);

        assert!(prompt.as_str().contains("Age: 30"));
        assert!(prompt.as_str().contains("Allergies: None"));
        assert!(prompt.as_str().contains("Conditions: None"));
    }

    #[test]
    fn every_variant_renders_non_empty_text() {
        for language in [Language::En, Language::Hi] {
            for query_type in [QueryType::Medicine, QueryType::Food, QueryType::General] {
                for item in ["", "Aspirin", "{age} {item}"] {
                    let prompt = render(&request(query_type, item, language));
                    assert!(!prompt.as_str().trim().is_empty());
                    assert!(prompt.as_str().contains(item));
                }
            }
        }
    }

    #[test]
    fn unknown_type_renders_like_general() {
        let unknown = request(QueryType::from_param("surgery"), "knee", Language::En);
        let general = request(QueryType::General, "knee", Language::En);
        assert_eq!(render(&unknown), render(&general));
    }

    #[test]
    fn rendering_is_deterministic() {
        let req = request(QueryType::Food, "Rice", Language::Hi);
        assert_eq!(render(&req), render(&req));
    }
}
