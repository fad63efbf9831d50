//! Site-config synchronizer.

use folio_models::{RichText, SiteLinks, SiteProfile};
use folio_notion::{NotionApi, Page, PropertyValue, QueryRequest};
use tracing::{info, warn};

use crate::config::SiteSchema;
use crate::error::{Result, SyncError};

/// Fetches the settings row and flattens it into a profile.
///
/// Returns `Ok(None)` when the database has no rows; the site then keeps
/// its built-in defaults.
pub async fn sync_site(
    api: &dyn NotionApi,
    database: &str,
    schema: &SiteSchema,
) -> Result<Option<SiteProfile>> {
    let unavailable = |source| SyncError::Site {
        database: database.to_string(),
        source,
    };

    let meta = api.retrieve_database(database).await.map_err(unavailable)?;
    info!(
        database = %database,
        title = %meta.display_title().unwrap_or_else(|| database.to_string()),
        "Site DB OK"
    );

    let list = api
        .query_database(database, &QueryRequest::limit(1))
        .await
        .map_err(unavailable)?;

    match list.results.first() {
        Some(row) => Ok(Some(map_site(row, schema))),
        None => {
            warn!(database = %database, "Site DB has no rows, skipping site profile");
            Ok(None)
        }
    }
}

/// Maps the settings row into a profile. Missing properties become empty strings.
pub fn map_site(page: &Page, schema: &SiteSchema) -> SiteProfile {
    let property = |name: &str| page.property(name);
    let url = |name: &str| {
        property(name)
            .and_then(PropertyValue::as_url)
            .unwrap_or_default()
            .to_string()
    };

    SiteProfile {
        hero_name: property(&schema.name)
            .and_then(PropertyValue::as_title)
            .map(RichText::first)
            .unwrap_or_default(),
        hero_subtitle: pick_subtitle(property(&schema.subtitle)),
        links: SiteLinks {
            github: url(&schema.github),
            linkedin: url(&schema.linkedin),
        },
        contact_email: property(&schema.email)
            .and_then(PropertyValue::as_email)
            .unwrap_or_default()
            .to_string(),
        about_text: property(&schema.about)
            .and_then(PropertyValue::as_rich_text)
            .map(RichText::join)
            .unwrap_or_default(),
    }
}

/// Reads the tagline from whichever shape the property has drifted to.
///
/// Tried in order: rich text, a title-typed property, a string formula.
/// The first non-empty result wins.
pub fn pick_subtitle(value: Option<&PropertyValue>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let shapes: [fn(&PropertyValue) -> Option<String>; 3] = [
        |v| v.as_rich_text().map(RichText::join),
        |v| v.as_title().map(RichText::first),
        |v| v.as_formula_string().map(str::to_string),
    ];

    shapes
        .iter()
        .filter_map(|shape| shape(value))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value(raw: serde_json::Value) -> PropertyValue {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_subtitle_shapes() {
        let rich = value(json!({ "type": "rich_text", "rich_text": [
            { "plain_text": "Builds " }, { "plain_text": "compilers" }
        ] }));
        assert_eq!(pick_subtitle(Some(&rich)), "Builds compilers");

        let title = value(json!({ "type": "title", "title": [{ "plain_text": "As title" }] }));
        assert_eq!(pick_subtitle(Some(&title)), "As title");

        let formula = value(json!({
            "type": "formula",
            "formula": { "type": "string", "string": "From formula" }
        }));
        assert_eq!(pick_subtitle(Some(&formula)), "From formula");
    }

    #[test]
    fn test_subtitle_empty_cases() {
        assert_eq!(pick_subtitle(None), "");

        let empty = value(json!({ "type": "rich_text", "rich_text": [] }));
        assert_eq!(pick_subtitle(Some(&empty)), "");

        let number = value(json!({ "type": "number", "number": 4 }));
        assert_eq!(pick_subtitle(Some(&number)), "");
    }

    #[test]
    fn test_map_site() {
        let page: Page = serde_json::from_value(json!({
            "id": "settings",
            "last_edited_time": "2024-01-01T00:00:00.000Z",
            "properties": {
                "ProfilName": { "type": "title", "title": [{ "plain_text": "Ada Lovelace" }] },
                "Desc": { "type": "rich_text", "rich_text": [{ "plain_text": "Engineer" }] },
                "GitHub": { "type": "url", "url": "https://github.com/ada" },
                "LinkedIn": { "type": "url", "url": null },
                "Email": { "type": "email", "email": "ada@example.com" },
                "AboutText": { "type": "rich_text", "rich_text": [
                    { "plain_text": "First line. " }, { "plain_text": "Second line." }
                ] }
            }
        }))
        .unwrap();

        let site = map_site(&page, &SiteSchema::default());

        assert_eq!(site.hero_name, "Ada Lovelace");
        assert_eq!(site.hero_subtitle, "Engineer");
        assert_eq!(site.links.github, "https://github.com/ada");
        assert_eq!(site.links.linkedin, "");
        assert_eq!(site.contact_email, "ada@example.com");
        assert_eq!(site.about_text, "First line. Second line.");
    }

    #[test]
    fn test_title_shapes_keep_first_run_only() {
        let page: Page = serde_json::from_value(json!({
            "id": "settings",
            "last_edited_time": "2024-01-01T00:00:00.000Z",
            "properties": {
                "ProfilName": { "type": "title", "title": [
                    { "plain_text": "Ada" }, { "plain_text": " Lovelace" }
                ] },
                "Desc": { "type": "title", "title": [
                    { "plain_text": "Engineer" }, { "plain_text": " and writer" }
                ] }
            }
        }))
        .unwrap();

        let site = map_site(&page, &SiteSchema::default());

        assert_eq!(site.hero_name, "Ada");
        assert_eq!(site.hero_subtitle, "Engineer");
    }
}
