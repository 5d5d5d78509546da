use anyhow::Context;
use dietdesk_dietplan::{PlanDocument, PlanMode};

pub fn encode(file: String) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&file).with_context(|| format!("reading {file}"))?;
    let document: PlanDocument = serde_json::from_str(&json)?;

    println!("{}", dietdesk_dietplan::encode(&document));

    Ok(())
}

pub fn decode(file: String, mode: Option<PlanMode>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&file).with_context(|| format!("reading {file}"))?;
    let document = match mode {
        Some(mode) => dietdesk_dietplan::decode_as(&text, mode),
        None => dietdesk_dietplan::decode(&text),
    };

    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(())
}

pub fn slots(start: i64, end: i64, duration: i64) {
    for slot in dietdesk_booking::generate_slots(start, end, duration) {
        println!("{slot}");
    }
}
