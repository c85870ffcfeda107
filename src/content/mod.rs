//! Site content document.
//!
//! Every page reads the same structured record: company details, navigation,
//! hero copy, about stats, services, pricing plans, projects, team, footer and
//! contact form labels. It is loaded once and served read-only.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use utoipa::ToSchema;

const EMBEDDED_SITE_DATA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/site/siteData.json"
));

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteData {
    pub company: Company,
    pub navigation: Vec<NavigationItem>,
    pub hero: Hero,
    pub about: About,
    pub services: Services,
    pub pricing: Pricing,
    pub projects: Projects,
    pub team: Team,
    pub footer: Footer,
    pub contact: Contact,
    pub metadata: Metadata,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub logo: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationItem {
    pub name: String,
    pub href: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CallToAction {
    pub text: String,
    pub href: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta: CallToAction,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutStat {
    pub number: String,
    pub label: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub stats: Vec<AboutStat>,
    pub image: String,
    pub parallax_bg: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceItem {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Services {
    pub title: String,
    pub items: Vec<ServiceItem>,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingPlan {
    pub title: String,
    pub price: String,
    pub period: String,
    pub description: String,
    pub features: Vec<String>,
    pub popular: bool,
    pub cta: CallToAction,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Pricing {
    pub title: String,
    pub subtitle: String,
    pub plans: Vec<PricingPlan>,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Projects {
    pub title: String,
    pub items: Vec<ProjectItem>,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub image: String,
    pub bio: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Team {
    pub title: String,
    pub members: Vec<TeamMember>,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Footer {
    pub quick_links: Vec<NavigationItem>,
    pub services: Vec<String>,
    pub contact_info: ContactInfo,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub placeholder: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitButton {
    pub text: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub fields: Vec<FormField>,
    pub submit_button: SubmitButton,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub title: String,
    pub form: ContactForm,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

impl SiteData {
    /// Parse a content document.
    ///
    /// # Errors
    /// Returns an error if `raw` is not a valid document.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid site data document")
    }

    /// Load the document from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read site data: {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("in {}", path.display()))
    }

    /// The document compiled into the binary.
    ///
    /// # Errors
    /// Returns an error if the embedded document is invalid.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_SITE_DATA)
    }

    /// Load `path` when given, otherwise fall back to the embedded document.
    ///
    /// # Errors
    /// Returns an error if the selected document cannot be loaded.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(Self::embedded, Self::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_document_parses() -> Result<()> {
        let site = SiteData::embedded()?;
        assert_eq!(site.company.name, "SiteCrafter");
        assert!(!site.navigation.is_empty());
        assert!(!site.services.items.is_empty());
        assert!(!site.pricing.plans.is_empty());
        assert!(!site.footer.contact_info.email.is_empty());
        Ok(())
    }

    #[test]
    fn missing_sections_default_to_empty() -> Result<()> {
        let site = SiteData::from_json(r#"{"company": {"name": "Acme"}, "extra": 1}"#)?;
        assert_eq!(site.company.name, "Acme");
        assert!(site.team.members.is_empty());
        assert_eq!(site.hero, Hero::default());
        Ok(())
    }

    #[test]
    fn form_field_type_is_renamed() -> Result<()> {
        let site = SiteData::from_json(
            r#"{"contact": {"form": {"fields": [{"name": "email", "type": "email"}]}}}"#,
        )?;
        assert_eq!(site.contact.form.fields[0].kind, "email");
        Ok(())
    }

    #[test]
    fn load_reports_path_on_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("siteData.json");
        fs::write(&path, "[]")?;

        let err = SiteData::load(&path).err().map(|e| format!("{e:#}"));
        assert!(err.is_some_and(|e| e.contains("siteData.json")));
        Ok(())
    }
}
