use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::PlanMode;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Day {
    #[strum(serialize = "pazartesi")]
    #[serde(rename = "pazartesi")]
    Monday,
    #[strum(serialize = "sali")]
    #[serde(rename = "sali")]
    Tuesday,
    #[strum(serialize = "carsamba")]
    #[serde(rename = "carsamba")]
    Wednesday,
    #[strum(serialize = "persembe")]
    #[serde(rename = "persembe")]
    Thursday,
    #[strum(serialize = "cuma")]
    #[serde(rename = "cuma")]
    Friday,
    #[strum(serialize = "cumartesi")]
    #[serde(rename = "cumartesi")]
    Saturday,
    #[strum(serialize = "pazar")]
    #[serde(rename = "pazar")]
    Sunday,
}

impl Day {
    /// Upper-cased header written above each day of a weekly plan.
    pub fn label(&self) -> &'static str {
        match self {
            Day::Monday => "PAZARTESİ",
            Day::Tuesday => "SALI",
            Day::Wednesday => "ÇARŞAMBA",
            Day::Thursday => "PERŞEMBE",
            Day::Friday => "CUMA",
            Day::Saturday => "CUMARTESİ",
            Day::Sunday => "PAZAR",
        }
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl Meal {
    pub fn label(&self) -> &'static str {
        match self {
            Meal::Breakfast => "KAHVALTI",
            Meal::Lunch => "ÖĞLE YEMEĞİ",
            Meal::Snack => "ARA ÖĞÜN",
            Meal::Dinner => "AKŞAM YEMEĞİ",
        }
    }
}

/// Four meals of one day. Empty string means no entry.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DayPlan {
    pub breakfast: String,
    pub lunch: String,
    pub snack: String,
    pub dinner: String,
}

impl DayPlan {
    pub fn get(&self, meal: Meal) -> &str {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::Snack => &self.snack,
            Meal::Dinner => &self.dinner,
        }
    }

    pub fn get_mut(&mut self, meal: Meal) -> &mut String {
        match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Snack => &mut self.snack,
            Meal::Dinner => &mut self.dinner,
        }
    }

    pub fn is_empty(&self) -> bool {
        Meal::VARIANTS
            .iter()
            .all(|meal| self.get(*meal).trim().is_empty())
    }

    /// Non-empty meals in breakfast, lunch, snack, dinner order.
    pub fn meals(&self) -> impl Iterator<Item = (Meal, &str)> {
        Meal::VARIANTS
            .iter()
            .map(|meal| (*meal, self.get(*meal).trim()))
            .filter(|(_, text)| !text.is_empty())
    }
}

/// Seven days keyed by their transliterated Turkish names, Monday first.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct WeekPlan {
    pub pazartesi: DayPlan,
    pub sali: DayPlan,
    pub carsamba: DayPlan,
    pub persembe: DayPlan,
    pub cuma: DayPlan,
    pub cumartesi: DayPlan,
    pub pazar: DayPlan,
}

impl WeekPlan {
    pub fn get(&self, day: Day) -> &DayPlan {
        match day {
            Day::Monday => &self.pazartesi,
            Day::Tuesday => &self.sali,
            Day::Wednesday => &self.carsamba,
            Day::Thursday => &self.persembe,
            Day::Friday => &self.cuma,
            Day::Saturday => &self.cumartesi,
            Day::Sunday => &self.pazar,
        }
    }

    pub fn get_mut(&mut self, day: Day) -> &mut DayPlan {
        match day {
            Day::Monday => &mut self.pazartesi,
            Day::Tuesday => &mut self.sali,
            Day::Wednesday => &mut self.carsamba,
            Day::Thursday => &mut self.persembe,
            Day::Friday => &mut self.cuma,
            Day::Saturday => &mut self.cumartesi,
            Day::Sunday => &mut self.pazar,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = (Day, &DayPlan)> {
        Day::VARIANTS.iter().map(|day| (*day, self.get(*day)))
    }

    pub fn is_empty(&self) -> bool {
        self.days().all(|(_, plan)| plan.is_empty())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "mode", content = "plan")]
pub enum PlanBody {
    Daily(DayPlan),
    Weekly(WeekPlan),
}

impl Default for PlanBody {
    fn default() -> Self {
        PlanBody::Daily(DayPlan::default())
    }
}

impl PlanBody {
    pub fn empty(mode: PlanMode) -> Self {
        match mode {
            PlanMode::Daily => PlanBody::Daily(DayPlan::default()),
            PlanMode::Weekly => PlanBody::Weekly(WeekPlan::default()),
        }
    }
}

/// A diet plan as edited in forms: free-text notes plus one day or a week of meals.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct PlanDocument {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub body: PlanBody,
}

impl PlanDocument {
    pub fn daily(notes: impl Into<String>, day: DayPlan) -> Self {
        Self {
            notes: notes.into(),
            body: PlanBody::Daily(day),
        }
    }

    pub fn weekly(notes: impl Into<String>, week: WeekPlan) -> Self {
        Self {
            notes: notes.into(),
            body: PlanBody::Weekly(week),
        }
    }

    pub fn mode(&self) -> PlanMode {
        match self.body {
            PlanBody::Daily(_) => PlanMode::Daily,
            PlanBody::Weekly(_) => PlanMode::Weekly,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.trim().is_empty()
            && match &self.body {
                PlanBody::Daily(day) => day.is_empty(),
                PlanBody::Weekly(week) => week.is_empty(),
            }
    }
}
