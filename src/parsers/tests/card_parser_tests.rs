use crate::browser::fake::card;
use crate::config::SelectorConfig;
use crate::parsers::CompiledSelectors;
use crate::parsers::cards::parse_cards;
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> CompiledSelectors {
        CompiledSelectors::compile(&SelectorConfig::default()).unwrap()
    }

    fn base() -> Url {
        Url::parse("https://www.upwork.com/freelance-jobs/web-scraping/").unwrap()
    }

    #[test]
    fn test_full_card() {
        let html = format!(
            "<html><body>{}</body></html>",
            card("Build a crawler", "/freelance-jobs/apply/crawler_~01/")
        );
        let records = parse_cards(&html, &base(), &selectors());

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.title, "Build a crawler");
        assert_eq!(
            record.link,
            "https://www.upwork.com/freelance-jobs/apply/crawler_~01/"
        );
        assert_eq!(record.description, "About Build a crawler");
        assert_eq!(record.hourly_rate, "$30.00-$60.00");
        assert_eq!(record.hours_needed, "30+ hrs/week");
        assert_eq!(record.duration, "1-3 months");
        assert_eq!(record.expert_level, "Intermediate");
        assert_eq!(record.skills, vec!["Rust", "Scraping"]);
    }

    #[test]
    fn test_card_count_matches_record_count() {
        let cards = (0..7)
            .map(|i| card(&format!("Job {i}"), &format!("/jobs/{i}")))
            .collect::<Vec<_>>()
            .join("\n");
        let html = format!("<html><body>{cards}</body></html>");

        let records = parse_cards(&html, &base(), &selectors());
        assert_eq!(records.len(), 7);
        assert_eq!(records[3].title, "Job 3");
        assert_eq!(records[6].link, "https://www.upwork.com/jobs/6");
    }

    #[test]
    fn test_missing_hourly_rate_defaults_to_empty() {
        let html = r#"<html><body>
            <section data-qa="job-tile">
                <a data-qa="job-title" href="/jobs/1">Fixed price job</a>
                <p data-qa="duration">Duration: <strong>Less than 1 month</strong></p>
            </section>
        </body></html>"#;
        let records = parse_cards(html, &base(), &selectors());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hourly_rate, "");
        assert_eq!(records[0].duration, "Less than 1 month");

        let value = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(value["hourlyRate"], "");
    }

    #[test]
    fn test_empty_card_yields_all_defaults() {
        let html = r#"<html><body><section data-qa="job-tile"></section></body></html>"#;
        let records = parse_cards(html, &base(), &selectors());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0], crate::results::JobRecord::default());
        assert!(records[0].skills.is_empty());
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let html = r#"<html><body><section data-qa="job-tile">
            <a data-qa="job-title" href="/jobs/1">
                Data   entry
                specialist
            </a>
            <span data-qa="legacy-skill">  Excel </span>
            <span data-qa="legacy-skill">Google
                Sheets</span>
        </section></body></html>"#;
        let records = parse_cards(html, &base(), &selectors());

        assert_eq!(records[0].title, "Data entry specialist");
        assert_eq!(records[0].skills, vec!["Excel", "Google Sheets"]);
    }

    #[test]
    fn test_inline_markup_does_not_add_spaces() {
        let html = r#"<html><body><section data-qa="job-tile">
            <a data-qa="job-title" href="/jobs/1">Senior <b>Rust</b>developer</a>
            <small>$30<span>.00</span>/hr</small>
            <p data-qa="job-description">Needs <em>fast</em> <strong>crawlers</strong>.</p>
        </section></body></html>"#;
        let records = parse_cards(html, &base(), &selectors());

        assert_eq!(records[0].title, "Senior Rustdeveloper");
        assert_eq!(records[0].hourly_rate, "$30.00/hr");
        assert_eq!(records[0].description, "Needs fast crawlers.");
    }

    #[test]
    fn test_no_cards() {
        let records = parse_cards("<html><body></body></html>", &base(), &selectors());
        assert!(records.is_empty());
    }
}
