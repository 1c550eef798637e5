use crate::data_models::{Connection, PRIMARY_ALUMNI, RawResult};

/// Turns one raw search hit into a contact candidate.
///
/// Search titles for profiles follow the shape
/// `"John Doe - Software Engineer - Acme | LinkedIn"`; anything that is not a
/// person-profile link (company pages, articles) is dropped.
pub struct ProfileParser {
    institution_keyword: String,
}

impl ProfileParser {
    pub fn new(institution_keyword: &str) -> ProfileParser {
        ProfileParser {
            institution_keyword: institution_keyword.to_lowercase(),
        }
    }

    pub fn parse(&self, item: &RawResult, connection_type: &str, tier: u8) -> Option<Connection> {
        if !item.link.contains("linkedin.com/in") {
            return None;
        }

        let name = extract_name(&item.title);
        let role = extract_role(&item.title);
        let company = extract_company_mention(&item.title);
        let confidence = self.confidence(&item.title, &item.snippet, connection_type);

        Some(Connection::new(
            name,
            role,
            company,
            item.link.clone(),
            item.snippet.clone(),
            connection_type.to_string(),
            tier,
            confidence,
        ))
    }

    /// Heuristic 0-100 guess that this person actually works at the company.
    fn confidence(&self, title: &str, snippet: &str, connection_type: &str) -> u8 {
        let title_lower = title.to_lowercase();
        let snippet_lower = snippet.to_lowercase();
        let mut confidence: i32 = 50;

        if snippet_lower.contains("alumni") || snippet_lower.contains("graduated") {
            confidence += 20;
        }
        if title_lower.contains(&self.institution_keyword)
            || snippet_lower.contains(&self.institution_keyword)
        {
            confidence += 15;
        }
        if title.contains(" - ") && title_lower.contains("linkedin") {
            confidence += 10;
        }
        if connection_type == PRIMARY_ALUMNI {
            confidence += 5;
        }

        confidence.clamp(0, 100) as u8
    }
}

/// Text before the first `-` or `|`, with the site-brand token stripped.
fn extract_name(title: &str) -> String {
    let head = title.split(['-', '|']).next().unwrap_or("");
    head.replace("LinkedIn", "").trim().to_string()
}

/// Segment between the first and second `-`, if the title has that shape.
fn extract_role(title: &str) -> String {
    let mut parts = title.split('-');
    let _head = parts.next();
    let middle = parts.next().unwrap_or("");
    if parts.next().is_none() || middle.contains('|') {
        return String::new();
    }
    middle.trim().to_string()
}

/// Segment between the last `-` and the first `|`, if both are present.
fn extract_company_mention(title: &str) -> String {
    let Some(bar) = title.find('|') else {
        return String::new();
    };
    let prefix = &title[..bar];
    let Some(dash) = prefix.rfind('-') else {
        return String::new();
    };
    prefix[dash + 1..].trim().to_string()
}

#[test]
fn test_rejects_non_profile_links() {
    let parser = ProfileParser::new("IIT");
    let company_page = RawResult {
        title: "Acme Corp | LinkedIn".into(),
        link: "https://linkedin.com/company/acme".into(),
        snippet: "Acme Corp on LinkedIn".into(),
    };
    assert!(parser.parse(&company_page, PRIMARY_ALUMNI, 1).is_none());

    let article = RawResult {
        title: "Why Acme is hiring".into(),
        link: "https://news.example.com/acme".into(),
        snippet: "".into(),
    };
    assert!(parser.parse(&article, PRIMARY_ALUMNI, 1).is_none());
}

#[test]
fn test_extracts_name_role_and_company() {
    let parser = ProfileParser::new("IIT");
    let item = RawResult {
        title: "John Doe - Software Engineer - Acme | LinkedIn".into(),
        link: "https://linkedin.com/in/johndoe".into(),
        snippet: "John Doe, Software Engineer at Acme.".into(),
    };
    let conn = parser.parse(&item, PRIMARY_ALUMNI, 1).unwrap();
    assert_eq!(conn.name, "John Doe");
    assert_eq!(conn.title, "Software Engineer");
    assert_eq!(conn.current_company, "Acme");
    assert_eq!(conn.tier, 1);
}

#[test]
fn test_partial_title_shapes() {
    let parser = ProfileParser::new("IIT");

    // no second dash: no role segment
    let item = RawResult {
        title: "Jane Roe - Acme".into(),
        link: "https://linkedin.com/in/janeroe".into(),
        snippet: "".into(),
    };
    let conn = parser.parse(&item, "Company Employee", 4).unwrap();
    assert_eq!(conn.name, "Jane Roe");
    assert_eq!(conn.title, "");
    assert_eq!(conn.current_company, "");

    // bare name with brand suffix only
    let item = RawResult {
        title: "Sam Lee | LinkedIn".into(),
        link: "https://linkedin.com/in/samlee".into(),
        snippet: "".into(),
    };
    let conn = parser.parse(&item, "Company Employee", 4).unwrap();
    assert_eq!(conn.name, "Sam Lee");
    assert_eq!(conn.current_company, "");
}

#[test]
fn test_confidence_heuristic() {
    let parser = ProfileParser::new("IIT");

    // base 50, +20 alumni, +15 institution keyword, +10 shape, +5 top tier = 100
    let item = RawResult {
        title: "A B - Engineer - Acme | LinkedIn".into(),
        link: "https://linkedin.com/in/ab".into(),
        snippet: "IIT alumni, now at Acme".into(),
    };
    let conn = parser.parse(&item, PRIMARY_ALUMNI, 1).unwrap();
    assert_eq!(conn.confidence, 100);

    // base only: plain title, no mentions, lower tier
    let item = RawResult {
        title: "A B".into(),
        link: "https://linkedin.com/in/ab".into(),
        snippet: "works somewhere".into(),
    };
    let conn = parser.parse(&item, "Company Employee", 4).unwrap();
    assert_eq!(conn.confidence, 50);
}

#[test]
fn test_confidence_never_exceeds_100() {
    let parser = ProfileParser::new("IIT");
    let item = RawResult {
        title: "A B - Engineer - Acme | LinkedIn IIT".into(),
        link: "https://linkedin.com/in/ab".into(),
        snippet: "IIT alumni graduated from IIT, alumni network".into(),
    };
    let conn = parser.parse(&item, PRIMARY_ALUMNI, 1).unwrap();
    assert!(conn.confidence <= 100);
}
