//! Plain-text sharing of an encoded plan.

/// Message body sent over WhatsApp. The plan text is reused verbatim.
pub fn whatsapp_message(client_name: &str, title: &str, content: &str) -> String {
    let mut message = String::new();

    let title = title.trim();
    if !title.is_empty() {
        message.push_str(&format!("*{title}*\n"));
    }

    let client_name = client_name.trim();
    if !client_name.is_empty() {
        message.push_str(&format!("Merhaba {client_name},\n"));
    }

    if !message.is_empty() {
        message.push('\n');
    }

    message.push_str(content.trim());

    message
}

/// `wa.me` deep link for a Turkish phone number, `None` when it has no digits.
pub fn whatsapp_link(phone: &str, message: &str) -> Option<String> {
    let digits = phone
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect::<String>();

    let number = if let Some(local) = digits.strip_prefix('0') {
        format!("90{local}")
    } else if digits.len() == 10 && digits.starts_with('5') {
        format!("90{digits}")
    } else {
        digits
    };

    if number.is_empty() {
        return None;
    }

    Some(format!(
        "https://wa.me/{number}?text={}",
        urlencoding::encode(message)
    ))
}
