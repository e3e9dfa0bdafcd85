//! Page rendering. Every page is a plain `String` so it can be tested without a
//! terminal.

use chrono::NaiveDate;

use sao_catalog::presentation::{
    Presentable, Tone, format_continuity_price, format_cycle, format_feature_price,
    format_offer_price,
};
use sao_catalog::{Catalog, CreditWarning, PriceRange, SearchIndex, SearchWidget, WidgetState};
use sao_core::{Money, TierId};
use sao_features::{Bundle, Feature, MarketplaceFilter};
use sao_offers::{
    AttractionKind, AttractionOffer, AttractionTerms, ContinuityCategory, ContinuityOffer,
    DownsellKind, DownsellOffer, DownsellTerms, OfferBase, OfferKind, Severity, UpsellCategory,
    UpsellOffer,
};
use sao_prefs::PreferenceStore;
use sao_tiers::{ComparisonColumn, PricingTier, ToggleOutcome};

use crate::style::Style;

#[derive(Debug, Default)]
struct Page {
    out: String,
}

impl Page {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn heading(&mut self, style: &Style, title: &str) {
        self.line(style.bold(title));
        self.line("=".repeat(title.chars().count()));
    }

    fn bullets<S: AsRef<str>>(&mut self, items: &[S]) {
        for item in items {
            self.line(format!("  - {}", item.as_ref()));
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

fn name_or_id<'a>(catalog: &'a Catalog, id: &'a str) -> &'a str {
    catalog.name_of(id).unwrap_or(id)
}

// Features

pub fn features(
    catalog: &Catalog,
    filter: &MarketplaceFilter,
    range: PriceRange,
    style: &Style,
) -> String {
    let mut page = Page::default();
    page.heading(style, "Features Marketplace");

    let shown: Vec<&Feature> = catalog
        .marketplace(filter)
        .into_iter()
        .filter(|f| range.admits(&f.pricing))
        .collect();

    if shown.is_empty() {
        page.line("No features match your filters.");
    }
    for f in &shown {
        page.blank();
        page.line(format!(
            "{} {} {}",
            style.bold(&f.name),
            style.badge(f.category.badge()),
            style.badge(f.dependency.kind.badge()),
        ));
        page.line(format!("  {}", format_feature_price(&f.pricing)));
        page.line(format!("  {}", f.description));
        if !f.dependency.required_features.is_empty() {
            let names: Vec<&str> = f
                .dependency
                .required_features
                .iter()
                .map(|r| name_or_id(catalog, r.as_str()))
                .collect();
            page.line(style.dim(&format!("  Requires: {}", names.join(", "))));
        }
    }

    page.blank();
    let mut footer = format!("Showing {} of {} features", shown.len(), catalog.features().len());
    if range.is_filtered() {
        footer.push_str(&format!(" priced {}", range.label()));
    }
    page.line(style.dim(&footer));
    page.finish()
}

// Tiers

fn tier_block(page: &mut Page, catalog: &Catalog, tier: &PricingTier, style: &Style) {
    let mut title = style.bold(&tier.name);
    if tier.is_popular {
        title.push(' ');
        title.push_str(&style.paint(Tone::Primary, "★ Most Popular"));
    }
    page.line(title);
    if !tier.tagline.is_empty() {
        page.line(format!("  {}", tier.tagline));
    }
    page.line(format!(
        "  {} setup + {}/mo ({} first year)",
        tier.setup_cost,
        tier.monthly_cost,
        tier.first_year_total()
    ));
    if let Some(limit) = tier.call_limit {
        page.line(format!("  Up to {limit} calls/month"));
    }
    let names: Vec<&str> = tier.features.iter().map(|f| name_or_id(catalog, f.as_str())).collect();
    page.bullets(&names);
    for excluded in &tier.excluded_features {
        page.line(style.dim(&format!("  x {excluded}")));
    }
    if let Some(up) = &tier.upgrade_path {
        page.line(format!("  Upgrade path: {}", name_or_id(catalog, up.as_str())));
    }
}

pub fn tiers(catalog: &Catalog, include_downsell: bool, style: &Style) -> String {
    let mut page = Page::default();
    page.heading(style, "Pricing Tiers");
    for tier in catalog.tiers() {
        page.blank();
        tier_block(&mut page, catalog, tier, style);
    }
    if include_downsell {
        page.blank();
        page.heading(style, "Downsell Tiers");
        for tier in catalog.downsell_tiers() {
            page.blank();
            tier_block(&mut page, catalog, tier, style);
        }
    }
    page.finish()
}

// Comparison

/// Toggle each requested tier in order, then render the matrix. With no
/// request, every comparable tier is selected.
pub fn compare(catalog: &Catalog, requested: &[String], style: &Style) -> String {
    let mut page = Page::default();
    page.heading(style, "Compare Tiers");

    let mut comparison = catalog.tier_comparison();
    let ids: Vec<TierId> = if requested.is_empty() {
        catalog.comparable_tiers()
    } else {
        let mut ids = Vec::new();
        for raw in requested {
            match TierId::parse(raw.trim()) {
                Ok(id) => ids.push(id),
                Err(_) => page.line(style.paint(Tone::Orange, &format!("`{raw}` is not a tier id"))),
            }
        }
        ids
    };

    for id in &ids {
        // Command-line ids select; only the interactive panel toggles off.
        if comparison.is_selected(id) {
            continue;
        }
        match comparison.toggle(id) {
            ToggleOutcome::Added | ToggleOutcome::Removed => {}
            ToggleOutcome::NotComparable => page.line(
                style.paint(Tone::Orange, &format!("`{id}` is not available for comparison")),
            ),
            ToggleOutcome::LimitReached => page.line(style.paint(
                Tone::Orange,
                &format!("Comparison is limited to 3 tiers; `{id}` was skipped"),
            )),
        }
    }

    let matrix = comparison.matrix(catalog.tiers());
    if matrix.is_empty() {
        page.line("Select tiers to compare.");
        return page.finish();
    }

    let label_width = matrix
        .rows
        .iter()
        .map(|r| name_or_id(catalog, r.feature.as_str()).chars().count())
        .max()
        .unwrap_or(0)
        .max("First year".len());
    let col_width = matrix
        .columns
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(10);

    let mut header = format!("{:label_width$}", "");
    for col in &matrix.columns {
        header.push_str(&format!("  {:>col_width$}", col.name));
    }
    page.blank();
    page.line(style.bold(&header));

    for row in &matrix.rows {
        let mut line = format!("{:label_width$}", name_or_id(catalog, row.feature.as_str()));
        for included in &row.included {
            line.push_str(&format!("  {:>col_width$}", if *included { "✓" } else { "—" }));
        }
        page.line(line);
    }

    let totals: [(&str, fn(&ComparisonColumn) -> Money); 3] = [
        ("Setup", |c| c.setup),
        ("Monthly", |c| c.monthly),
        ("First year", |c| c.first_year),
    ];
    for (label, amount) in totals {
        let mut line = format!("{label:label_width$}");
        for col in &matrix.columns {
            line.push_str(&format!("  {:>col_width$}", amount(col).to_string()));
        }
        page.line(line);
    }
    page.finish()
}

// Offers

/// Which offers an `offers` page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferSelection {
    All,
    Attraction(Option<AttractionKind>),
    Upsell(Option<UpsellCategory>),
    Downsell(Option<DownsellKind>),
    Continuity(Option<ContinuityCategory>),
}

fn offer_header(page: &mut Page, base: &OfferBase, badge: String, price: String, style: &Style) {
    page.blank();
    page.line(format!("{} {}", style.bold(&base.name), badge));
    page.line(format!("  {price}"));
    page.line(format!("  {}", base.description));
    if !base.when_to_present.is_empty() {
        page.line(style.dim(&format!("  When: {}", base.when_to_present)));
    }
}

fn attraction(page: &mut Page, catalog: &Catalog, offer: &AttractionOffer, style: &Style) {
    let price = format_offer_price(&offer.base.pricing);
    offer_header(page, &offer.base, style.badge(offer.kind().badge()), price, style);
    match &offer.terms {
        AttractionTerms::Decoy(d) => {
            page.line("  Deliberately missing:");
            page.bullets(&d.deliberately_missing);
            let up = &d.upgrade_target;
            page.line(format!(
                "  Upgrade to {} at {}, {} credit within {} days",
                name_or_id(catalog, up.target.as_str()),
                format_offer_price(&up.pricing),
                up.credits_applied,
                up.timeframe_days
            ));
        }
        AttractionTerms::BuyXGetY(t) => {
            for item in &t.buy_items {
                page.line(format!("  Buy: {} ({})", item.item, item.price));
            }
            for item in &t.free_items {
                page.line(format!("  Free: {} ({} value)", item.item, item.value));
            }
            page.line(style.paint(Tone::Green, &format!("  You save {}", t.total_savings)));
        }
        AttractionTerms::PayLessNow(t) => {
            page.line(format!(
                "  {} now, {} later unless {}",
                t.upfront_payment, t.deferred_payment, t.waiver_condition
            ));
        }
        AttractionTerms::Trial(t) => {
            page.line(format!("  {} trial, delivered in {} days", t.trial_price, t.delivery_days));
            for path in &t.continuation_paths {
                page.line(format!(
                    "  -> {}: {}, {} credit ({} net first year)",
                    path.name,
                    format_offer_price(&path.pricing),
                    path.credits,
                    path.net_first_year()
                ));
            }
        }
    }
}

fn upsell(page: &mut Page, catalog: &Catalog, offer: &UpsellOffer, style: &Style) {
    let price = format_offer_price(&offer.base.pricing);
    offer_header(page, &offer.base, style.badge(offer.category.badge()), price, style);
    page.bullets(&offer.improvements);
    if !offer.roi_justification.is_empty() {
        page.line(format!("  ROI: {}", offer.roi_justification));
    }
    if let Some(credit) = &offer.credit_if_upgrade {
        page.line(style.paint(
            Tone::Green,
            &format!(
                "  {} credit toward {} within {} days",
                credit.amount,
                name_or_id(catalog, credit.upgrade_to.as_str()),
                credit.timeframe_days
            ),
        ));
    }
}

fn downsell(page: &mut Page, catalog: &Catalog, offer: &DownsellOffer, style: &Style) {
    let price = format_offer_price(&offer.base.pricing);
    offer_header(page, &offer.base, style.badge(offer.kind().badge()), price, style);
    match &offer.terms {
        DownsellTerms::PaymentPlan(plan) => {
            for step in &plan.payment_schedule {
                let mut line = if step.occurrences > 1 {
                    format!("  {} x {} {}", step.amount, step.occurrences, step.timing)
                } else {
                    format!("  {} {}", step.amount, step.timing)
                };
                if let Some(m) = &step.milestone {
                    line.push_str(&format!(" ({m})"));
                }
                page.line(line);
            }
            page.line(format!(
                "  {} payments totalling {}",
                plan.payment_count(),
                plan.schedule_total()
            ));
        }
        DownsellTerms::FeatureReduction(r) => {
            page.line(format!("  Reduced price {}", r.reduced_price));
            for removed in &r.removed_features {
                page.line(style.dim(&format!("  x {removed}")));
            }
            page.line(format!(
                "  Upgrade to {} for {} more",
                name_or_id(catalog, r.upgrade_path.target.as_str()),
                r.upgrade_path.additional_cost
            ));
        }
    }
}

fn continuity(page: &mut Page, offer: &ContinuityOffer, style: &Style) {
    let price = format_continuity_price(offer);
    offer_header(page, &offer.base, style.badge(offer.category.badge()), price, style);
    page.line(format!(
        "  Billed {}, {} a year",
        format_cycle(offer.billing_cycle).to_lowercase(),
        offer.annual_value()
    ));
    if let Some(months) = offer.minimum_commitment_months {
        page.line(format!(
            "  {months}-month minimum ({})",
            offer.minimum_commitment_value()
        ));
    }
    page.bullets(&offer.included_services);
}

fn section(page: &mut Page, kind: OfferKind, count: usize, style: &Style) {
    page.blank();
    page.heading(style, &format!("{} ({count})", kind.badge().label));
}

pub fn offers(catalog: &Catalog, selection: OfferSelection, style: &Style) -> String {
    let mut page = Page::default();

    let show_attraction = matches!(selection, OfferSelection::All | OfferSelection::Attraction(_));
    if show_attraction {
        let list: Vec<&AttractionOffer> = match selection {
            OfferSelection::Attraction(Some(kind)) => catalog.attraction_by_kind(kind),
            _ => catalog.attraction_offers().collect(),
        };
        section(&mut page, OfferKind::Attraction, list.len(), style);
        for o in list {
            attraction(&mut page, catalog, o, style);
        }
    }

    if matches!(selection, OfferSelection::All | OfferSelection::Upsell(_)) {
        let list: Vec<&UpsellOffer> = match selection {
            OfferSelection::Upsell(Some(category)) => catalog.upsells_by_category(category),
            _ => catalog.upsell_offers().collect(),
        };
        section(&mut page, OfferKind::Upsell, list.len(), style);
        for o in list {
            upsell(&mut page, catalog, o, style);
        }
    }

    if matches!(selection, OfferSelection::All | OfferSelection::Downsell(_)) {
        let list: Vec<&DownsellOffer> = match selection {
            OfferSelection::Downsell(Some(kind)) => catalog.downsells_by_kind(kind),
            _ => catalog.downsell_offers().collect(),
        };
        section(&mut page, OfferKind::Downsell, list.len(), style);
        for o in list {
            downsell(&mut page, catalog, o, style);
        }
    }

    if matches!(selection, OfferSelection::All | OfferSelection::Continuity(_)) {
        let list: Vec<&ContinuityOffer> = match selection {
            OfferSelection::Continuity(Some(category)) => catalog.continuity_by_category(category),
            _ => catalog.continuity_offers().collect(),
        };
        section(&mut page, OfferKind::Continuity, list.len(), style);
        for o in list {
            continuity(&mut page, o, style);
        }
    }

    page.finish()
}

// Search

pub fn search(index: &SearchIndex, query: &str, style: &Style) -> String {
    let mut page = Page::default();
    let mut widget = SearchWidget::new(index);
    match widget.input(query) {
        WidgetState::Idle => page.line(format!(
            "Type at least {} characters to search.",
            index.config().min_query_len
        )),
        WidgetState::ShowingEmpty => {
            if let Some(message) = widget.empty_message() {
                page.line(message);
            }
        }
        WidgetState::ShowingResults(n) => {
            page.line(style.dim(&format!("{n} result(s) for \"{}\"", widget.query())));
            for r in widget.results() {
                page.blank();
                let price = r.price.as_deref().map(|p| format!("  {p}")).unwrap_or_default();
                page.line(format!("{} {}{price}", style.badge(r.kind.badge()), style.bold(&r.name)));
                page.line(format!("  {}", r.description));
                page.line(style.dim(&format!("  {} {}", r.section, r.kind.anchor())));
            }
        }
    }
    page.finish()
}

// Bundle

pub fn bundle(catalog: &Catalog, bundle: &Bundle, style: &Style) -> String {
    let mut page = Page::default();
    page.heading(style, "Bundle Calculator");

    for f in bundle.selected(catalog.features()) {
        page.line(format!("  {:<32} {}", f.name, format_feature_price(&f.pricing)));
    }

    let totals = catalog.bundle_totals(bundle);
    page.blank();
    page.line(format!("  Setup:      {}", totals.setup));
    page.line(format!("  Monthly:    {}", totals.monthly));
    if !totals.annual.is_zero() {
        page.line(format!("  Annual:     {}", totals.annual));
    }
    page.line(style.bold(&format!("  First year: {}", totals.first_year())));

    let savings = catalog.bundle_savings(bundle);
    if !savings.is_zero() {
        if let Some(complete) = catalog.tier("complete") {
            page.line(style.paint(
                Tone::Green,
                &format!("  {} saves {savings} on setup", complete.name),
            ));
        }
    }

    for missing in bundle.missing_dependencies(catalog.features()) {
        page.line(style.paint(
            Tone::Orange,
            &format!(
                "  {} requires {}",
                name_or_id(catalog, missing.feature.as_str()),
                name_or_id(catalog, missing.requires.as_str())
            ),
        ));
    }
    page.finish()
}

// Upgrades

pub fn upgrades(
    catalog: &Catalog,
    from: Option<&str>,
    window: Option<(NaiveDate, NaiveDate)>,
    style: &Style,
) -> String {
    let mut page = Page::default();
    page.heading(style, "Upgrade Paths");

    let paths = match from {
        Some(id) => catalog.upgrades_from(id),
        None => catalog.upgrade_paths().iter().collect(),
    };
    if paths.is_empty() {
        page.line("No upgrade paths.");
    }
    for p in paths {
        page.blank();
        page.line(format!(
            "{} -> {}",
            style.bold(name_or_id(catalog, p.from.as_str())),
            style.bold(name_or_id(catalog, p.to.as_str()))
        ));
        page.line(format!("  {} credit within {} days", p.credit, p.timeframe_days));
        if !p.description.is_empty() {
            page.line(format!("  {}", p.description));
        }
        if let Some((purchased, today)) = window {
            let deadline = p.credit_deadline(purchased);
            let line = if p.credit_available(purchased, today) {
                style.paint(Tone::Green, &format!("  Credit available until {deadline}"))
            } else {
                style.paint(Tone::Red, &format!("  Credit expired {deadline}"))
            };
            page.line(line);
        }
    }
    page.finish()
}

pub fn upsells_due(catalog: &Catalog, tier: &str, days: u32, style: &Style) -> String {
    let mut page = Page::default();
    page.heading(
        style,
        &format!("Upsells due for {} after {days} days", name_or_id(catalog, tier)),
    );
    let due = catalog.upsells_due(tier, days);
    if due.is_empty() {
        page.line("Nothing due yet.");
    }
    for t in due {
        page.line(format!("  {}: {}", name_or_id(catalog, t.feature.as_str()), t.trigger));
    }
    page.finish()
}

// Reference tiers

pub fn support(catalog: &Catalog, style: &Style) -> String {
    let mut page = Page::default();
    page.heading(style, "Support Tiers");
    for tier in catalog.support_tiers() {
        page.blank();
        page.line(format!("{} {}/mo", style.bold(&tier.name), tier.price));
        page.line(format!("  Coverage: {}", tier.coverage));
        for severity in Severity::ALL {
            if let Some(level) = tier.response_for(severity) {
                let tone = match severity {
                    Severity::P1 => Tone::Red,
                    Severity::P2 => Tone::Orange,
                    Severity::P3 => Tone::Blue,
                };
                page.line(format!(
                    "  {} respond {}, resolve {}",
                    style.paint(tone, severity.as_str()),
                    level.response_time,
                    level.resolution_target
                ));
            }
        }
        let changes = &tier.included_changes;
        if changes.minor + changes.medium > 0 {
            page.line(format!(
                "  Includes {} minor and {} medium changes",
                changes.minor, changes.medium
            ));
        }
        page.bullets(&tier.additional_benefits);
    }
    page.finish()
}

pub fn coaching(catalog: &Catalog, style: &Style) -> String {
    let mut page = Page::default();
    page.heading(style, "Coaching");
    for tier in catalog.coaching_tiers() {
        page.blank();
        page.line(format!("{} {}/mo", style.bold(&tier.name), tier.price));
        page.line(format!(
            "  {}, {} minutes",
            tier.session_frequency, tier.session_duration_minutes
        ));
        page.line(format!(
            "  {}-month minimum ({})",
            tier.minimum_commitment_months,
            tier.commitment_total()
        ));
        page.bullets(&tier.included_services);
        page.line(style.dim(&format!("  For: {}", tier.target_audience)));
    }
    page.finish()
}

pub fn summary(catalog: &Catalog, style: &Style) -> String {
    let s = catalog.summary();
    let mut page = Page::default();
    page.heading(style, "Catalog Summary");
    page.line(format!("  Features:          {}", s.feature_count));
    page.line(format!("  Individual value:  {}", s.individual_value));
    if let Some(setup) = s.complete_setup {
        page.line(format!("  Complete setup:    {setup} (save {})", s.complete_savings()));
    }
    page.blank();
    for kind in OfferKind::ALL {
        page.line(format!("  {:<18} {}", format!("{}:", kind.badge().label), s.offers.get(kind)));
    }
    page.line(format!("  {:<18} {}", "Total offers:", s.offers.total()));
    page.blank();
    page.line("  Maximum monthly recurring:");
    for (category, amount) in &s.max_recurring.by_category {
        page.line(format!("    {:<22} {amount}", category.badge().label));
    }
    page.line(format!("    {:<22} {}", "Support", s.max_recurring.support));
    page.line(format!("    {:<22} {}", "Coaching", s.max_recurring.coaching));
    page.line(style.bold(&format!("    {:<22} {}", "Total", s.max_recurring.total())));
    page.finish()
}

// Preferences

pub fn saved(catalog: &Catalog, store: &PreferenceStore, style: &Style) -> String {
    let mut page = Page::default();
    for (title, ids) in [("Bookmarks", store.bookmarks()), ("Liked", store.liked())] {
        page.heading(style, title);
        if ids.is_empty() {
            page.line(style.dim("  (none)"));
        }
        for id in ids {
            match catalog.name_of(id) {
                Some(name) => page.line(format!("  {name} ({id})")),
                None => page.line(style.dim(&format!("  {id} (no longer in the catalog)"))),
            }
        }
        page.blank();
    }
    page.finish()
}

pub fn validate(catalog: &Catalog, warnings: &[CreditWarning], style: &Style) -> String {
    let mut page = Page::default();
    let s = catalog.summary();
    page.line(style.paint(
        Tone::Green,
        &format!(
            "Catalog OK: {} features, {} tiers, {} offers, {} upgrade paths",
            s.feature_count,
            catalog.tiers().len() + catalog.downsell_tiers().len(),
            s.offers.total(),
            catalog.upgrade_paths().len()
        ),
    ));
    for w in warnings {
        page.line(style.paint(Tone::Orange, &format!("warning: {w}")));
    }
    page.finish()
}
