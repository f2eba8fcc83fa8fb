use chrono::NaiveDate;

use crate::config::SenderDetails;

/// Fixed block structure of the printed letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterLayout {
    /// Name (bold), email, phone.
    pub sender: Vec<String>,
    pub date: String,
    pub recipient: Vec<String>,
    /// One entry per source line; empty entries are paragraph gaps.
    pub paragraphs: Vec<String>,
    pub closing: String,
    pub signature: String,
}

impl LetterLayout {
    pub fn new(letter: &str, company_name: &str, sender: &SenderDetails, date: NaiveDate) -> Self {
        let mut paragraphs: Vec<String> = Vec::new();
        for line in letter.lines().map(str::trim) {
            // Collapse runs of blank lines into one gap.
            if line.is_empty() && paragraphs.last().map_or(true, |p| p.is_empty()) {
                continue;
            }
            paragraphs.push(line.to_string());
        }
        while paragraphs.last().is_some_and(|p| p.is_empty()) {
            paragraphs.pop();
        }

        Self {
            sender: vec![
                sender.name.clone(),
                sender.email.clone(),
                sender.phone.clone(),
            ],
            date: format_letter_date(date),
            recipient: vec![company_name.trim().to_string()],
            paragraphs,
            closing: "Sincerely,".to_string(),
            signature: sender.name.clone(),
        }
    }
}

impl LetterLayout {
    /// Every piece of text that ends up on the page, one per line.
    pub fn printed_text(&self) -> String {
        self.sender
            .iter()
            .chain(std::iter::once(&self.date))
            .chain(&self.recipient)
            .chain(&self.paragraphs)
            .chain([&self.closing, &self.signature])
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// "Month Day, Year", e.g. `March 5, 2024`.
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `Cover_Letter_<company>.pdf`, each whitespace run replaced by `_`.
pub fn export_file_name(company_name: &str) -> String {
    let mut name = String::from("Cover_Letter_");
    let mut in_whitespace = false;
    for c in company_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }
    name.push_str(".pdf");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_file_name_replaces_whitespace() {
        assert_eq!(export_file_name("Acme Corp"), "Cover_Letter_Acme_Corp.pdf");
        assert_eq!(export_file_name("Acme"), "Cover_Letter_Acme.pdf");
        assert_eq!(
            export_file_name("Big \t Blue\nInc"),
            "Cover_Letter_Big_Blue_Inc.pdf"
        );
        assert_eq!(export_file_name(" Acme "), "Cover_Letter__Acme_.pdf");
    }

    #[test]
    fn test_letter_date_format() {
        assert_eq!(format_letter_date(date()), "March 5, 2024");
        assert_eq!(
            format_letter_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()),
            "October 16, 2026"
        );
    }

    #[test]
    fn test_layout_blocks() {
        let layout = LetterLayout::new(
            "Dear Acme,\n\n\n\nI build things.\nThanks.\n\n",
            " Acme Corp ",
            &SenderDetails::default(),
            date(),
        );
        assert_eq!(
            layout.sender,
            vec!["Your Name", "your.email@example.com", "Your Phone Number"]
        );
        assert_eq!(layout.date, "March 5, 2024");
        assert_eq!(layout.recipient, vec!["Acme Corp"]);
        assert_eq!(
            layout.paragraphs,
            vec!["Dear Acme,", "", "I build things.", "Thanks."]
        );
        assert_eq!(layout.closing, "Sincerely,");
        assert_eq!(layout.signature, "Your Name");
    }

    #[test]
    fn test_layout_uses_configured_sender() {
        let sender = SenderDetails {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
        };
        let layout = LetterLayout::new("Hi", "Acme", &sender, date());
        assert_eq!(layout.sender[0], "Ada Lovelace");
        assert_eq!(layout.signature, "Ada Lovelace");
    }

    #[test]
    fn test_printed_text_covers_every_block() {
        let layout = LetterLayout::new("Dear Acme,\n\nThanks.", "Acme", &SenderDetails::default(), date());
        assert_eq!(
            layout.printed_text(),
            "Your Name\nyour.email@example.com\nYour Phone Number\nMarch 5, 2024\nAcme\n\
             Dear Acme,\n\nThanks.\nSincerely,\nYour Name"
        );
    }
}
