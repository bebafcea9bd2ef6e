//! Keyword router for the validated demo topics. Rules are checked in order and the first
//! match wins; this is a heuristic front door, not language understanding.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    CompanyRegistry,
    RestaurantVat,
    Citizenship,
    FiscalTargets,
    Unrecognized,
    Empty,
}

impl Topic {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CompanyRegistry => "Administration",
            Self::RestaurantVat => "Finance",
            Self::Citizenship => "Law",
            Self::FiscalTargets => "Finance",
            Self::Unrecognized => "Unrecognized",
            Self::Empty => "Empty",
        }
    }
}

/// Every keyword in `all` must appear, plus at least one keyword of `any` when non-empty.
struct Rule {
    topic: Topic,
    all: &'static [&'static str],
    any: &'static [&'static str],
}

impl Rule {
    fn matches(&self, question: &str) -> bool {
        self.all.iter().all(|keyword| question.contains(keyword))
            && (self.any.is_empty() || self.any.iter().any(|keyword| question.contains(keyword)))
    }
}

const RULES: &[Rule] = &[
    Rule {
        topic: Topic::CompanyRegistry,
        all: &["мол"],
        any: &["еоод", "управител", "търговски"],
    },
    Rule {
        topic: Topic::RestaurantVat,
        all: &["ддс"],
        any: &["9", "ресторан", "кетъринг"],
    },
    Rule {
        topic: Topic::Citizenship,
        all: &["гражданств"],
        any: &[],
    },
    Rule {
        topic: Topic::FiscalTargets,
        all: &[],
        any: &["дефицит", "3%", "дълг", "60%", "aic", "догон", "бюджет"],
    },
];

pub fn classify(question: &str) -> Topic {
    let normalized = question.trim().to_lowercase();
    if normalized.is_empty() {
        return Topic::Empty;
    }

    RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map(|rule| rule.topic)
        .unwrap_or(Topic::Unrecognized)
}

#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub topic: Topic,
    pub domain: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub fn answer(question: &str) -> Answer {
    let topic = classify(question);
    let (title, body) = canned_answer(topic);
    Answer {
        topic,
        domain: topic.label(),
        title,
        body,
    }
}

fn canned_answer(topic: Topic) -> (&'static str, &'static str) {
    match topic {
        Topic::CompanyRegistry => (
            "Административен отговор: Смяна на МОЛ (управител) на ЕООД",
            "- Решение на едноличния собственик за освобождаване/назначаване на управител\n\
             - Декларации по ТЗ от новия управител\n\
             - Образец от подпис (спесимен)\n\
             - Заявление А4 в Търговски регистър (електронно)\n\
             - Такса + подаване с КЕП",
        ),
        Topic::RestaurantVat => (
            "Финансов отговор (демо): ДДС 9% за ресторанти",
            "Сценарийният модел изчислява ефекта върху приходите, дефицита (% от БВП) и дълга.\n\
             Използвай мярката vat_restaurants_9 или модела за ДДС в ресторантьорството.",
        ),
        Topic::Citizenship => (
            "Юридически отговор (демо): промени в закона за българското гражданство",
            "1) Какво се променя (хипотези + критерии)\n\
             2) Засегнати разпоредби (ЗБГ, подзаконови актове)\n\
             3) Процедура и администрация (МП, президент, ДАНС/МВР при проверки)\n\
             4) Рискове (конституционен, ЕС, съдебни спорове)",
        ),
        Topic::FiscalTargets => (
            "Фискални цели (демо)",
            "• Дефицит ≤ 3% от БВП\n\
             • Дълг ≤ 60% от БВП\n\
             • Максимално бързо догонване по AIC (ЕС=100)\n\
             • Без повишение на данъци",
        ),
        Topic::Unrecognized => (
            "Неразпозната тема",
            "Демото разпознава: „ДДС 9% ресторанти“, „смяна на МОЛ на ЕООД“, \
             „закон за гражданството“, „дефицит/дълг/AIC“.",
        ),
        Topic::Empty => (
            "Въведи въпрос",
            "Демото е настроено за: ДДС 9% ресторанти, смяна на МОЛ на ЕООД, \
             промени в закона за гражданството, бюджетни цели (дефицит/дълг/AIC).",
        ),
    }
}
