use crate::{
    Day, DayPlan, Meal, PlanBody, PlanDocument, PlanMode,
    keyword::{DAYS, NOTES_LABEL, fold_str},
    token::{Token, classify},
};

/// Weekly when any day name appears anywhere in the text, daily otherwise.
///
/// Kept for text stored without a mode; new records carry their mode
/// explicitly and go through [`decode_as`].
pub fn detect_mode(text: &str) -> PlanMode {
    let folded = fold_str(text);

    if DAYS.iter().any(|(_, keyword)| folded.contains(keyword)) {
        PlanMode::Weekly
    } else {
        PlanMode::Daily
    }
}

pub fn encode(document: &PlanDocument) -> String {
    let mut out = String::new();

    let notes = document.notes.trim();
    if !notes.is_empty() {
        out.push_str(NOTES_LABEL);
        out.push('\n');
        out.push_str(notes);
        out.push_str("\n\n");
    }

    match &document.body {
        PlanBody::Daily(day) => write_meals(&mut out, day),
        PlanBody::Weekly(week) => {
            for (day, plan) in week.days().filter(|(_, plan)| !plan.is_empty()) {
                out.push_str(day.label());
                out.push('\n');
                write_meals(&mut out, plan);
                out.push('\n');
            }
        }
    }

    out.trim_end().to_owned()
}

fn write_meals(out: &mut String, day: &DayPlan) {
    for (meal, text) in day.meals() {
        out.push_str(meal.label());
        out.push_str(": ");
        out.push_str(text);
        out.push('\n');
    }
}

/// Parses text with the mode inferred by [`detect_mode`].
pub fn decode(text: &str) -> PlanDocument {
    decode_as(text, detect_mode(text))
}

/// Parses text in a known mode. Never fails: unrecognised input ends up in
/// the notes or is dropped.
pub fn decode_as(text: &str, mode: PlanMode) -> PlanDocument {
    let mut notes = Vec::new();
    let mut body = PlanBody::empty(mode);
    let mut current_day: Option<Day> = None;
    let mut current_meal: Option<Meal> = None;

    for line in text.lines() {
        match classify(line, mode) {
            Token::Blank => {}
            Token::NotesHeader => {
                current_day = None;
                current_meal = None;
            }
            Token::DayHeader(day) => {
                current_day = Some(day);
                current_meal = None;
            }
            Token::MealHeader(meal, inline) => match &mut body {
                PlanBody::Daily(plan) => {
                    current_meal = Some(meal);
                    append(plan.get_mut(meal), inline);
                }
                PlanBody::Weekly(week) => {
                    if let Some(day) = current_day {
                        current_meal = Some(meal);
                        append(week.get_mut(day).get_mut(meal), inline);
                    }
                }
            },
            Token::Text(text) => match (&mut body, current_day, current_meal) {
                (PlanBody::Daily(plan), _, Some(meal)) => append(plan.get_mut(meal), text),
                (PlanBody::Daily(_), _, None) => notes.push(text),
                (PlanBody::Weekly(week), Some(day), Some(meal)) => {
                    append(week.get_mut(day).get_mut(meal), text)
                }
                (PlanBody::Weekly(_), None, _) => notes.push(text),
                (PlanBody::Weekly(_), Some(day), None) => {
                    tracing::debug!(day = %day, line = text, "dropping text outside of a meal");
                }
            },
        }
    }

    PlanDocument {
        notes: notes.join("\n"),
        body,
    }
}

fn append(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }

    if !target.is_empty() {
        target.push('\n');
    }

    target.push_str(text);
}
