use crate::{
    Day, Meal, PlanMode,
    keyword::{DAYS, Folded, MEALS, NOTES, Separator, fold_str},
};

/// Day headers are short lines such as `SALI` or `1. GÜN - SALI`.
const DAY_HEADER_MAX_WORDS: usize = 3;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Blank,
    NotesHeader,
    DayHeader(Day),
    MealHeader(Meal, &'a str),
    Text(&'a str),
}

pub(crate) fn classify(line: &str, mode: PlanMode) -> Token<'_> {
    let line = line.trim_end();
    if line.trim().is_empty() {
        return Token::Blank;
    }

    if is_notes_header(line) {
        return Token::NotesHeader;
    }

    let folded = Folded::new(line);
    let start = folded.content_start();

    let weekly = mode == PlanMode::Weekly;
    let day_shaped = weekly && folded.word_count() <= DAY_HEADER_MAX_WORDS;

    if day_shaped && let Some(day) = day_at(&folded, start) {
        return Token::DayHeader(day);
    }

    if let Some((meal, inline)) = meal_at(&folded, start) {
        return Token::MealHeader(meal, inline);
    }

    if day_shaped && let Some(day) = day_anywhere(&folded, start) {
        return Token::DayHeader(day);
    }

    if let Some((meal, inline)) = meal_anywhere(&folded, start) {
        return Token::MealHeader(meal, inline);
    }

    Token::Text(line)
}

fn is_notes_header(line: &str) -> bool {
    let folded = fold_str(line.trim());
    folded.strip_suffix(':').unwrap_or(&folded).trim_end() == NOTES
}

fn day_at(folded: &Folded<'_>, start: usize) -> Option<Day> {
    DAYS.iter()
        .find(|(_, keyword)| folded.keyword_at(start, keyword).is_some())
        .map(|(day, _)| *day)
}

fn day_anywhere(folded: &Folded<'_>, start: usize) -> Option<Day> {
    DAYS.iter()
        .filter_map(|(day, keyword)| folded.find_keyword(start, keyword).map(|(pos, _)| (pos, *day)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, day)| day)
}

fn meal_at<'a>(folded: &Folded<'a>, start: usize) -> Option<(Meal, &'a str)> {
    MEALS.iter().find_map(|keyword| {
        let end = folded.keyword_at(start, keyword.text)?;
        match folded.separator(end)? {
            Separator::Colon(pos) => Some((keyword.meal, folded.rest(pos))),
            Separator::End => Some((keyword.meal, "")),
            Separator::Space(pos) if !keyword.strict => Some((keyword.meal, folded.rest(pos))),
            Separator::Space(_) => None,
        }
    })
}

fn meal_anywhere<'a>(folded: &Folded<'a>, start: usize) -> Option<(Meal, &'a str)> {
    MEALS
        .iter()
        .filter_map(|keyword| {
            let mut from = start;
            while let Some((pos, end)) = folded.find_keyword(from, keyword.text) {
                if let Some(Separator::Colon(rest)) = folded.separator(end) {
                    return Some((pos, keyword.meal, rest));
                }
                from = end;
            }
            None
        })
        .min_by_key(|(pos, _, _)| *pos)
        .map(|(_, meal, rest)| (meal, folded.rest(rest)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines() {
        assert_eq!(classify("", PlanMode::Daily), Token::Blank);
        assert_eq!(classify("   \t", PlanMode::Weekly), Token::Blank);
    }

    #[test]
    fn day_headers_only_in_weekly_mode() {
        assert_eq!(
            classify("PAZARTESİ", PlanMode::Weekly),
            Token::DayHeader(Day::Monday)
        );
        assert_eq!(
            classify("📅 cumartesi:", PlanMode::Weekly),
            Token::DayHeader(Day::Saturday)
        );
        assert_eq!(
            classify("1. Gün - Salı", PlanMode::Weekly),
            Token::DayHeader(Day::Tuesday)
        );
        assert_eq!(classify("PAZARTESİ", PlanMode::Daily), Token::Text("PAZARTESİ"));
    }

    #[test]
    fn long_lines_mentioning_a_day_are_text() {
        assert_eq!(
            classify("pazar günü serbest öğün yapabilirsiniz", PlanMode::Weekly),
            Token::Text("pazar günü serbest öğün yapabilirsiniz")
        );
    }

    #[test]
    fn meal_headers_seed_inline_text() {
        assert_eq!(
            classify("KAHVALTI: 2 haşlanmış yumurta", PlanMode::Daily),
            Token::MealHeader(Meal::Breakfast, "2 haşlanmış yumurta")
        );
        assert_eq!(
            classify("Öğle Yemeği  ızgara tavuk", PlanMode::Daily),
            Token::MealHeader(Meal::Lunch, "ızgara tavuk")
        );
        assert_eq!(
            classify("ara öğün:", PlanMode::Weekly),
            Token::MealHeader(Meal::Snack, "")
        );
        assert_eq!(
            classify("* AKSAM: sebze yemeği", PlanMode::Daily),
            Token::MealHeader(Meal::Dinner, "sebze yemeği")
        );
    }

    #[test]
    fn short_meal_keywords_need_a_colon() {
        assert_eq!(
            classify("Akşam yürüyüşü yapın", PlanMode::Daily),
            Token::Text("Akşam yürüyüşü yapın")
        );
    }

    #[test]
    fn meal_keyword_inside_line_with_colon() {
        assert_eq!(
            classify("2) Öğle yemeği: mercimek çorbası", PlanMode::Daily),
            Token::MealHeader(Meal::Lunch, "mercimek çorbası")
        );
        assert_eq!(
            classify("bol su için, kahvaltı öncesi", PlanMode::Daily),
            Token::Text("bol su için, kahvaltı öncesi")
        );
    }

    #[test]
    fn notes_header() {
        assert_eq!(classify("GENEL NOTLAR:", PlanMode::Weekly), Token::NotesHeader);
        assert_eq!(classify("  Genel notlar", PlanMode::Daily), Token::NotesHeader);
    }

    #[test]
    fn lines_mentioning_notes_are_text() {
        assert_eq!(
            classify("Notlar: günde 2 litre su", PlanMode::Daily),
            Token::Text("Notlar: günde 2 litre su")
        );
        assert_eq!(classify("notlar", PlanMode::Daily), Token::Text("notlar"));
        assert_eq!(
            classify("GENEL NOTLAR: tuzsuz", PlanMode::Weekly),
            Token::Text("GENEL NOTLAR: tuzsuz")
        );
    }

    #[test]
    fn indentation_is_kept_for_text() {
        assert_eq!(
            classify("  - 1 dilim tam buğday ekmeği  ", PlanMode::Daily),
            Token::Text("  - 1 dilim tam buğday ekmeği")
        );
    }
}
