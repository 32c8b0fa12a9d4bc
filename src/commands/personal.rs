//! Personal Info Commands
//!
//! A single row under a fixed key, edited as plain text: one list entry per
//! line and `platform: url` lines for social links.

use std::collections::BTreeMap;
use supabase_lite::{Filter, Query, ServiceResult, TableApi, TableFilter};

use super::to_row;
use crate::models::{PersonalInfo, PERSONAL_INFO_ID};
use crate::store::Record;

pub fn personal_query() -> Query {
    Query::new().eq("id", PERSONAL_INFO_ID).limit(1)
}

pub fn personal_feed() -> TableFilter {
    TableFilter::table(PersonalInfo::TABLE).with_filter(Filter::eq("id", PERSONAL_INFO_ID))
}

/// Upsert under the fixed key, whatever id `info` carries.
pub async fn save_personal_info<A: TableApi + ?Sized>(api: &A, info: &PersonalInfo) -> ServiceResult<()> {
    let row = PersonalInfo { id: PERSONAL_INFO_ID.to_string(), ..info.clone() };
    api.upsert(PersonalInfo::TABLE, vec![to_row(&row)?]).await
}

/// Text form of the editable fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonalInfoForm {
    pub bio: String,
    pub skills: String,
    pub education: String,
    pub experience: String,
    pub interests: String,
    pub social_links: String,
}

fn join_lines(items: &[String]) -> String {
    items.join("\n")
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_links(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let (platform, url) = line.split_once(':')?;
            let (platform, url) = (platform.trim(), url.trim());
            // "https://x" alone splits on the scheme; a platform has no slashes
            if platform.is_empty() || url.is_empty() || url.starts_with("//") {
                return None;
            }
            Some((platform.to_string(), url.to_string()))
        })
        .collect()
}

impl PersonalInfoForm {
    pub fn from_info(info: &PersonalInfo) -> Self {
        Self {
            bio: info.bio.clone(),
            skills: join_lines(&info.skills),
            education: join_lines(&info.education),
            experience: join_lines(&info.experience),
            interests: join_lines(&info.interests),
            social_links: info
                .social_links
                .iter()
                .map(|(platform, url)| format!("{}: {}", platform, url))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn to_info(&self) -> PersonalInfo {
        PersonalInfo {
            id: PERSONAL_INFO_ID.to_string(),
            bio: self.bio.trim().to_string(),
            skills: split_lines(&self.skills),
            education: split_lines(&self.education),
            experience: split_lines(&self.experience),
            interests: split_lines(&self.interests),
            social_links: parse_links(&self.social_links),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{Call, FakeApi};

    fn info() -> PersonalInfo {
        PersonalInfo {
            id: PERSONAL_INFO_ID.into(),
            bio: "Front-end **fixer**.".into(),
            skills: vec!["Rust".into(), "CSS".into()],
            education: vec!["BSc CS".into()],
            experience: vec![],
            interests: vec!["Climbing".into()],
            social_links: BTreeMap::from([
                ("github".to_string(), "https://github.com/ff".to_string()),
                ("x".to_string(), "https://x.com/ff".to_string()),
            ]),
        }
    }

    #[test]
    fn test_form_round_trip() {
        let form = PersonalInfoForm::from_info(&info());
        assert_eq!(form.skills, "Rust\nCSS");
        assert_eq!(form.social_links, "github: https://github.com/ff\nx: https://x.com/ff");
        assert_eq!(form.to_info(), info());
    }

    #[test]
    fn test_parsing_drops_blank_and_malformed_lines() {
        let form = PersonalInfoForm {
            skills: "  Rust \n\n  \nWASM".into(),
            social_links: "github: https://github.com/ff\nno separator\nhttps://bare.example\n: https://x".into(),
            ..Default::default()
        };
        let parsed = form.to_info();
        assert_eq!(parsed.skills, vec!["Rust".to_string(), "WASM".to_string()]);
        assert_eq!(
            parsed.social_links,
            BTreeMap::from([("github".to_string(), "https://github.com/ff".to_string())])
        );
    }

    #[tokio::test]
    async fn test_save_upserts_fixed_id() {
        let api = FakeApi::default();
        let stray = PersonalInfo { id: "something-else".into(), ..info() };
        save_personal_info(&api, &stray).await.unwrap();
        match &api.calls()[..] {
            [Call::Upsert { table, rows }] => {
                assert_eq!(table, "personal_info");
                assert_eq!(rows[0]["id"], PERSONAL_INFO_ID);
                assert_eq!(rows[0]["skills"][1], "CSS");
            }
            other => panic!("unexpected calls {:?}", other),
        }
    }

    #[test]
    fn test_query_reads_fixed_id() {
        assert_eq!(
            personal_query().to_query_string(),
            format!("select=*&id=eq.{}&limit=1", PERSONAL_INFO_ID)
        );
    }
}
