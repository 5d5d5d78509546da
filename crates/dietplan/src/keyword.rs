use crate::{Day, Meal};

/// Day keywords in folded form, longest first so `CUMARTESI` wins over `CUMA`
/// and `PAZARTESI` over `PAZAR`.
pub(crate) const DAYS: [(Day, &str); 7] = [
    (Day::Monday, "PAZARTESI"),
    (Day::Saturday, "CUMARTESI"),
    (Day::Wednesday, "CARSAMBA"),
    (Day::Thursday, "PERSEMBE"),
    (Day::Sunday, "PAZAR"),
    (Day::Friday, "CUMA"),
    (Day::Tuesday, "SALI"),
];

pub(crate) struct MealKeyword {
    pub meal: Meal,
    pub text: &'static str,
    /// Only a colon or the end of the line may follow the keyword.
    pub strict: bool,
}

pub(crate) const MEALS: [MealKeyword; 7] = [
    MealKeyword {
        meal: Meal::Dinner,
        text: "AKSAM YEMEGI",
        strict: false,
    },
    MealKeyword {
        meal: Meal::Lunch,
        text: "OGLE YEMEGI",
        strict: false,
    },
    MealKeyword {
        meal: Meal::Snack,
        text: "ARA OGUNU",
        strict: true,
    },
    MealKeyword {
        meal: Meal::Snack,
        text: "ARA OGUN",
        strict: false,
    },
    MealKeyword {
        meal: Meal::Breakfast,
        text: "KAHVALTI",
        strict: false,
    },
    MealKeyword {
        meal: Meal::Dinner,
        text: "AKSAM",
        strict: true,
    },
    MealKeyword {
        meal: Meal::Lunch,
        text: "OGLE",
        strict: true,
    },
];

/// Folded notes header; only a line holding nothing else counts.
pub(crate) const NOTES: &str = "GENEL NOTLAR";

/// Header written by the encoder above general notes.
pub(crate) const NOTES_LABEL: &str = "GENEL NOTLAR:";

/// Maps a character to its ASCII upper-case Turkish fold, `None` for marks
/// that carry no letter of their own (combining dot above).
fn fold_char(c: char) -> Option<char> {
    let folded = match c {
        'ç' | 'Ç' => 'C',
        'ğ' | 'Ğ' => 'G',
        'ı' | 'İ' | 'i' | 'I' | 'î' | 'Î' => 'I',
        'ö' | 'Ö' => 'O',
        'ş' | 'Ş' => 'S',
        'ü' | 'Ü' | 'û' | 'Û' => 'U',
        'â' | 'Â' => 'A',
        '\u{307}' => return None,
        c => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        }
    };

    Some(folded)
}

/// Folds a whole text for substring checks.
pub(crate) fn fold_str(value: &str) -> String {
    value.chars().filter_map(fold_char).collect()
}

/// A folded line that still knows where each folded char came from.
pub(crate) struct Folded<'a> {
    source: &'a str,
    chars: Vec<char>,
    starts: Vec<usize>,
}

pub(crate) enum Separator {
    Colon(usize),
    Space(usize),
    End,
}

impl<'a> Folded<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut chars = Vec::with_capacity(source.len());
        let mut starts = Vec::with_capacity(source.len());

        for (offset, c) in source.char_indices() {
            if let Some(folded) = fold_char(c) {
                chars.push(folded);
                starts.push(offset);
            }
        }

        Self {
            source,
            chars,
            starts,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Index of the first letter or digit, skipping emoji, bullets and the like.
    pub fn content_start(&self) -> usize {
        self.chars
            .iter()
            .position(|c| c.is_alphanumeric())
            .unwrap_or(self.len())
    }

    pub fn word_count(&self) -> usize {
        let mut count = 0;
        let mut in_word = false;
        for c in &self.chars {
            if c.is_alphanumeric() {
                if !in_word {
                    count += 1;
                }
                in_word = true;
            } else {
                in_word = false;
            }
        }

        count
    }

    fn is_boundary(&self, pos: usize) -> bool {
        pos >= self.len() || !self.chars[pos].is_alphanumeric()
    }

    /// Whole-word match of `keyword` at `pos`; returns the index right after it.
    pub fn keyword_at(&self, pos: usize, keyword: &str) -> Option<usize> {
        if pos > 0 && self.chars[pos - 1].is_alphanumeric() {
            return None;
        }

        let mut end = pos;
        for k in keyword.chars() {
            if self.chars.get(end) != Some(&k) {
                return None;
            }
            end += 1;
        }

        self.is_boundary(end).then_some(end)
    }

    /// First whole-word occurrence of `keyword` at or after `from`.
    pub fn find_keyword(&self, from: usize, keyword: &str) -> Option<(usize, usize)> {
        (from..self.len()).find_map(|pos| self.keyword_at(pos, keyword).map(|end| (pos, end)))
    }

    /// Reads what follows a keyword ending at `pos`.
    pub fn separator(&self, pos: usize) -> Option<Separator> {
        let mut cursor = pos;
        while cursor < self.len() && self.chars[cursor].is_whitespace() {
            cursor += 1;
        }

        if cursor >= self.len() {
            return Some(Separator::End);
        }

        if matches!(self.chars[cursor], ':' | '-' | '–') {
            return Some(Separator::Colon(cursor + 1));
        }

        (cursor > pos).then_some(Separator::Space(cursor))
    }

    /// Original text from folded index `pos`, leading whitespace removed.
    pub fn rest(&self, pos: usize) -> &'a str {
        match self.starts.get(pos) {
            Some(offset) => self.source[*offset..].trim(),
            None => "",
        }
    }
}
