//! Protected dashboard pages.
//!
//! Every page goes through [`SessionGate::require_session`] first, so an
//! anonymous caller only ever sees a redirect to the login view.

use super::{
    contact::{ContactClient, ContactForm, FormStatus},
    View,
};
use crate::{
    content::SiteData,
    session::{Guard, KeyValueStore, SessionGate, LOGIN_PATH},
};
use anyhow::Result;
use std::{fmt::Write as _, str::FromStr};

pub const SUBMITTED_NOTICE: &str =
    "Thank you! Your message has been sent. We will get back to you soon.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardPage {
    #[default]
    Home,
    Services,
    Pricing,
    Contact,
}

impl DashboardPage {
    pub const ALL: [Self; 4] = [Self::Home, Self::Services, Self::Pricing, Self::Contact];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Services => "services",
            Self::Pricing => "pricing",
            Self::Contact => "contact",
        }
    }
}

impl FromStr for DashboardPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| format!("unknown dashboard page: {s}"))
    }
}

/// Render the dashboard home, or send anonymous callers to the login view.
#[must_use]
pub fn render<S: KeyValueStore>(gate: &SessionGate<S>, site: &SiteData) -> View {
    render_page(gate, site, DashboardPage::Home)
}

#[must_use]
pub fn render_page<S: KeyValueStore>(
    gate: &SessionGate<S>,
    site: &SiteData,
    page: DashboardPage,
) -> View {
    match gate.require_session() {
        Guard::Pending => View::Placeholder,
        Guard::Redirect { to } => View::Redirect { to },
        Guard::Render(session) => View::Page(match page {
            DashboardPage::Home => home(&session.email, site),
            DashboardPage::Services => services(site),
            DashboardPage::Pricing => pricing(site),
            DashboardPage::Contact => contact(site, None),
        }),
    }
}

/// Submit the dashboard contact form for a signed-in user.
///
/// The form is only posted once the gate renders; otherwise the guard's view
/// comes back and `client` is never called.
pub async fn submit_contact<S: KeyValueStore>(
    gate: &SessionGate<S>,
    site: &SiteData,
    form: &mut ContactForm,
    client: &dyn ContactClient,
) -> View {
    match gate.require_session() {
        Guard::Pending => View::Placeholder,
        Guard::Redirect { to } => View::Redirect { to },
        Guard::Render(_) => {
            let status = form.submit(client).await.clone();
            View::Page(contact(site, Some(&status)))
        }
    }
}

/// Layout logout: clear the session, then go to the login view.
///
/// # Errors
/// Returns an error if the store rejects the write.
pub fn sign_out<S: KeyValueStore>(gate: &mut SessionGate<S>) -> Result<View> {
    gate.logout()?;
    Ok(View::Redirect { to: LOGIN_PATH })
}

fn home(email: &str, site: &SiteData) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Welcome back, {email}!");
    let _ = writeln!(
        out,
        "Here's an overview of your {} dashboard",
        site.company.name
    );

    if !site.about.stats.is_empty() {
        let _ = writeln!(out, "\nStats");
        for stat in &site.about.stats {
            let _ = writeln!(out, "  {:>8}  {}", stat.number, stat.label);
        }
    }

    if !site.services.items.is_empty() {
        let _ = writeln!(out, "\n{}", site.services.title);
        for service in &site.services.items {
            let _ = writeln!(out, "  - {}: {}", service.title, service.description);
        }
    }

    if !site.pricing.plans.is_empty() {
        let _ = writeln!(out, "\n{}", site.pricing.title);
        for plan in &site.pricing.plans {
            let popular = if plan.popular { " (popular)" } else { "" };
            let _ = writeln!(
                out,
                "  - {} {} {}{popular}",
                plan.title, plan.price, plan.period
            );
        }
    }

    if !site.projects.items.is_empty() {
        let _ = writeln!(out, "\n{}", site.projects.title);
        for project in site.projects.items.iter().take(3) {
            let _ = writeln!(out, "  - {} [{}]", project.title, project.category);
        }
    }

    out
}


fn services(site: &SiteData) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", site.services.title);
    for service in &site.services.items {
        let _ = writeln!(out, "\n  {}", service.title);
        let _ = writeln!(out, "  {}", service.description);
    }

    out
}

fn pricing(site: &SiteData) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", site.pricing.title);
    if !site.pricing.subtitle.is_empty() {
        let _ = writeln!(out, "{}", site.pricing.subtitle);
    }

    for plan in &site.pricing.plans {
        let popular = if plan.popular { "  [Most Popular]" } else { "" };
        let _ = writeln!(out, "\n  {}{popular}", plan.title);
        let _ = writeln!(out, "  {} /{}", plan.price, plan.period);
        if !plan.description.is_empty() {
            let _ = writeln!(out, "  {}", plan.description);
        }
        for feature in &plan.features {
            let _ = writeln!(out, "    * {feature}");
        }
        if !plan.cta.text.is_empty() {
            let _ = writeln!(out, "  -> {} ({})", plan.cta.text, plan.cta.href);
        }
    }

    out
}

fn contact(site: &SiteData, status: Option<&FormStatus>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", site.contact.title);

    let info = &site.footer.contact_info;
    let _ = writeln!(out, "\n  Email    {}", info.email);
    let _ = writeln!(out, "  Phone    {}", info.phone);
    let _ = writeln!(out, "  Address  {}", info.address);

    match status {
        Some(FormStatus::Submitted) => {
            let _ = writeln!(out, "\n{SUBMITTED_NOTICE}");
        }
        Some(FormStatus::Error(message)) => {
            let _ = writeln!(out, "\nError: {message}");
        }
        _ => {
            let _ = writeln!(out);
            for field in &site.contact.form.fields {
                let _ = writeln!(out, "  {} (--{})", field.label, field.name);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        contact::ContactSubmission,
        session::MemoryStore,
        views::contact::{SubmitError, EMPTY_FIELDS_MESSAGE},
    };
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[derive(Default)]
    struct CountingClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContactClient for CountingClient {
        async fn send(&self, _submission: &ContactSubmission) -> Result<String, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("sent".to_string())
        }
    }

    fn anonymous() -> SessionGate<MemoryStore> {
        let mut gate = SessionGate::new(MemoryStore::new());
        gate.initialize();
        gate
    }

    fn signed_in() -> Result<SessionGate<MemoryStore>> {
        let mut gate = anonymous();
        gate.login("a@b.com")?;
        Ok(gate)
    }

    fn page_text(view: View) -> Result<String> {
        match view {
            View::Page(page) => Ok(page),
            other => anyhow::bail!("expected a rendered page, got {other:?}"),
        }
    }

    #[test]
    fn anonymous_dashboard_redirects_to_login() -> Result<()> {
        let view = render(&anonymous(), &SiteData::embedded()?);

        assert_eq!(view, View::Redirect { to: LOGIN_PATH });
        Ok(())
    }

    #[test]
    fn uninitialized_gate_renders_placeholder() -> Result<()> {
        let gate = SessionGate::new(MemoryStore::new());
        assert_eq!(render(&gate, &SiteData::embedded()?), View::Placeholder);
        Ok(())
    }

    #[test]
    fn signed_in_dashboard_renders_content() -> Result<()> {
        let site = SiteData::embedded()?;
        let page = page_text(render(&signed_in()?, &site))?;

        assert!(page.starts_with("Welcome back, a@b.com!"));
        assert!(page.contains(&site.services.items[0].title));
        assert!(page.contains(&site.pricing.plans[0].price));
        Ok(())
    }

    #[test]
    fn every_page_redirects_anonymous_callers() -> Result<()> {
        let site = SiteData::embedded()?;
        let gate = anonymous();

        for page in DashboardPage::ALL {
            assert_eq!(
                render_page(&gate, &site, page),
                View::Redirect { to: LOGIN_PATH },
                "page: {}",
                page.as_str()
            );
        }
        Ok(())
    }

    #[test]
    fn services_page_lists_every_service() -> Result<()> {
        let site = SiteData::embedded()?;
        let page = page_text(render_page(&signed_in()?, &site, DashboardPage::Services))?;

        assert!(page.starts_with(&site.services.title));
        for service in &site.services.items {
            assert!(page.contains(&service.title));
            assert!(page.contains(&service.description));
        }
        Ok(())
    }

    #[test]
    fn pricing_page_shows_plan_details() -> Result<()> {
        let site = SiteData::embedded()?;
        let page = page_text(render_page(&signed_in()?, &site, DashboardPage::Pricing))?;

        for plan in &site.pricing.plans {
            assert!(page.contains(&plan.title));
            assert!(page.contains(&plan.description));
            assert!(page.contains(&plan.cta.text));
            for feature in &plan.features {
                assert!(page.contains(feature.as_str()), "feature: {feature}");
            }
        }
        assert!(page.contains("[Most Popular]"));
        Ok(())
    }

    #[test]
    fn contact_page_shows_contact_info_and_fields() -> Result<()> {
        let site = SiteData::embedded()?;
        let page = page_text(render_page(&signed_in()?, &site, DashboardPage::Contact))?;

        assert!(page.contains(&site.footer.contact_info.email));
        assert!(page.contains(&site.footer.contact_info.phone));
        for field in &site.contact.form.fields {
            assert!(page.contains(&field.label));
        }
        Ok(())
    }

    #[tokio::test]
    async fn anonymous_contact_submit_never_posts() -> Result<()> {
        let client = CountingClient::default();
        let mut form = ContactForm::new(ContactSubmission::new("Ada", "ada@example.com", "Hi"));

        let view = submit_contact(&anonymous(), &SiteData::embedded()?, &mut form, &client).await;

        assert_eq!(view, View::Redirect { to: LOGIN_PATH });
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.status(), &FormStatus::Idle);
        Ok(())
    }

    #[tokio::test]
    async fn signed_in_contact_submit_reports_status() -> Result<()> {
        let site = SiteData::embedded()?;
        let gate = signed_in()?;
        let client = CountingClient::default();

        let mut form = ContactForm::new(ContactSubmission::new("Ada", "ada@example.com", "Hi"));
        let page = page_text(submit_contact(&gate, &site, &mut form, &client).await)?;
        assert!(page.contains(SUBMITTED_NOTICE));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);

        let mut empty = ContactForm::new(ContactSubmission::new("Ada", "", "Hi"));
        let page = page_text(submit_contact(&gate, &site, &mut empty, &client).await)?;
        assert!(page.contains(EMPTY_FIELDS_MESSAGE));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn sign_out_clears_session_and_redirects() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        let mut gate = SessionGate::new(store.clone());
        gate.initialize();
        gate.login("a@b.com")?;

        assert_eq!(sign_out(&mut gate)?, View::Redirect { to: LOGIN_PATH });
        assert!(store.is_empty()?);
        assert_eq!(
            render(&gate, &SiteData::embedded()?),
            View::Redirect { to: LOGIN_PATH }
        );
        Ok(())
    }

    #[test]
    fn page_names_parse() {
        for page in DashboardPage::ALL {
            assert_eq!(page.as_str().parse::<DashboardPage>(), Ok(page));
        }
        assert!("billing".parse::<DashboardPage>().is_err());
    }
}
