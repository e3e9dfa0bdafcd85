//! Subcommand dispatch: parse arguments into catalog queries, render a page.

use std::path::PathBuf;

use anyhow::{Context, anyhow, bail};

use sao_catalog::{Catalog, PricePreset, PriceRange, SearchIndex};
use sao_core::{FeatureId, Money};
use sao_features::{Bundle, FeatureCategory, MarketplaceFilter};
use sao_offers::{AttractionKind, ContinuityCategory, DownsellKind, OfferKind, UpsellCategory};
use sao_prefs::{Notice, PreferenceStore, PrefsError};

use crate::cli::{Cli, Command};
use crate::pages::{self, OfferSelection};
use crate::style::Style;

/// Run one subcommand and return the rendered page.
pub fn run(cli: &Cli, style: &Style) -> anyhow::Result<String> {
    let catalog = Catalog::load_embedded().context("embedded catalog is inconsistent")?;

    match &cli.command {
        Command::Features {
            category,
            query,
            min,
            max,
            preset,
        } => {
            let mut filter = MarketplaceFilter::new();
            if let Some(raw) = category {
                filter = filter.with_category(parse_label(raw, "feature category", FeatureCategory::parse)?);
            }
            if let Some(q) = query {
                filter = filter.with_query(q.as_str());
            }
            let range = price_range(*min, *max, preset.as_deref())?;
            Ok(pages::features(&catalog, &filter, range, style))
        }
        Command::Tiers { downsell } => Ok(pages::tiers(&catalog, *downsell, style)),
        Command::Compare { tiers } => Ok(pages::compare(&catalog, tiers, style)),
        Command::Offers { kind, category } => {
            let selection = offer_selection(kind.as_deref(), category.as_deref())?;
            Ok(pages::offers(&catalog, selection, style))
        }
        Command::Search { query, json } => {
            let index = SearchIndex::build(&catalog);
            if *json {
                let results = index.search(query);
                let mut out =
                    serde_json::to_string_pretty(&results).context("failed to encode search results")?;
                out.push('\n');
                Ok(out)
            } else {
                Ok(pages::search(&index, query, style))
            }
        }
        Command::Bundle { features } => {
            let bundle = parse_bundle(&catalog, features)?;
            Ok(pages::bundle(&catalog, &bundle, style))
        }
        Command::Upgrades {
            from,
            purchased,
            today,
            days,
        } => {
            if let Some(id) = from.as_deref() {
                if !catalog.contains_id(id) {
                    bail!("unknown id `{id}`");
                }
            }
            let window = purchased.map(|p| {
                let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
                (p, today)
            });
            let mut out = pages::upgrades(&catalog, from.as_deref(), window, style);
            if let (Some(tier), Some(days)) = (from.as_deref(), days) {
                out.push('\n');
                out.push_str(&pages::upsells_due(&catalog, tier, *days, style));
            }
            Ok(out)
        }
        Command::Support => Ok(pages::support(&catalog, style)),
        Command::Coaching => Ok(pages::coaching(&catalog, style)),
        Command::Summary => Ok(pages::summary(&catalog, style)),
        Command::Bookmark { id } => {
            let name = catalog
                .name_of(id)
                .ok_or_else(|| anyhow!("unknown id `{id}`"))?
                .to_owned();
            let mut store = open_store(cli)?;
            let notice = match store.toggle_bookmark(id, &name) {
                Ok(toggle) => toggle.notice,
                Err(e) => Some(failed_save(&e)),
            };
            Ok(notice.map(|n| style.notice(&n) + "\n").unwrap_or_default())
        }
        Command::Like { id } => {
            if !catalog.contains_id(id) {
                bail!("unknown id `{id}`");
            }
            let mut store = open_store(cli)?;
            let mut out = String::new();
            match store.toggle_like(id) {
                Ok(toggle) => {
                    if let Some(n) = toggle.notice {
                        out.push_str(&style.notice(&n));
                        out.push('\n');
                    }
                    let mark = if toggle.active { "♥" } else { "♡" };
                    out.push_str(&format!("{mark} {}\n", store.like_count(id, 0)));
                }
                Err(e) => {
                    out.push_str(&style.notice(&failed_save(&e)));
                    out.push('\n');
                }
            }
            Ok(out)
        }
        Command::Saved { reset } => {
            let store = if *reset {
                PreferenceStore::reset(prefs_path(cli)?)
                    .context("failed to reset preference file")?
            } else {
                open_store(cli)?
            };
            Ok(pages::saved(&catalog, &store, style))
        }
        Command::Validate { strict } => {
            let warnings = catalog.audit();
            let out = pages::validate(&catalog, &warnings, style);
            if *strict && !warnings.is_empty() {
                bail!("{out}{} credit warning(s)", warnings.len());
            }
            Ok(out)
        }
    }
}

fn failed_save(err: &PrefsError) -> Notice {
    tracing::warn!(error = %err, "preference toggle not saved");
    Notice::from(err)
}

fn prefs_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match &cli.prefs {
        Some(path) => Ok(path.clone()),
        None => sao_prefs::default_path().context("cannot locate a preference file; pass --prefs"),
    }
}

fn open_store(cli: &Cli) -> anyhow::Result<PreferenceStore> {
    let path = prefs_path(cli)?;
    PreferenceStore::open(&path).with_context(|| {
        format!(
            "failed to open preferences at {}; `saved --reset` starts over",
            path.display()
        )
    })
}

fn parse_label<T>(raw: &str, what: &str, parse: impl Fn(&str) -> Option<T>) -> anyhow::Result<T> {
    parse(raw).ok_or_else(|| anyhow!("unknown {what} `{}`", raw.trim()))
}

fn price_range(min: Option<u64>, max: Option<u64>, preset: Option<&str>) -> anyhow::Result<PriceRange> {
    if let Some(label) = preset {
        let labels: Vec<&str> = sao_catalog::PRICE_PRESETS.iter().map(|p| p.label).collect();
        return PricePreset::find(label)
            .map(|p| p.range)
            .ok_or_else(|| anyhow!("unknown price preset `{label}` (one of: {})", labels.join(", ")));
    }
    Ok(PriceRange::new(
        min.map_or(PriceRange::FLOOR, Money::new),
        max.map_or(PriceRange::CEILING, Money::new),
    ))
}

fn offer_selection(kind: Option<&str>, category: Option<&str>) -> anyhow::Result<OfferSelection> {
    let Some(raw) = kind else {
        if category.is_some() {
            bail!("--category needs an offer kind");
        }
        return Ok(OfferSelection::All);
    };
    let kind = parse_label(raw, "offer kind", OfferKind::parse)?;
    Ok(match kind {
        OfferKind::Attraction => OfferSelection::Attraction(
            category
                .map(|c| parse_label(c, "attraction kind", AttractionKind::parse))
                .transpose()?,
        ),
        OfferKind::Upsell => OfferSelection::Upsell(
            category
                .map(|c| parse_label(c, "upsell category", UpsellCategory::parse))
                .transpose()?,
        ),
        OfferKind::Downsell => OfferSelection::Downsell(
            category
                .map(|c| parse_label(c, "downsell kind", DownsellKind::parse))
                .transpose()?,
        ),
        OfferKind::Continuity => OfferSelection::Continuity(
            category
                .map(|c| parse_label(c, "continuity category", ContinuityCategory::parse))
                .transpose()?,
        ),
    })
}

fn parse_bundle(catalog: &Catalog, ids: &[String]) -> anyhow::Result<Bundle> {
    let mut bundle = Bundle::new();
    for raw in ids {
        let id = FeatureId::parse(raw.trim()).with_context(|| format!("bad feature id `{raw}`"))?;
        if catalog.feature(id.as_str()).is_none() {
            bail!("unknown feature `{id}`");
        }
        bundle.add(id);
    }
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str], prefs: &std::path::Path) -> Cli {
        let mut argv = vec!["sao-site"];
        argv.extend_from_slice(args);
        let mut cli = Cli::try_parse_from(argv).unwrap();
        cli.prefs = Some(prefs.to_path_buf());
        cli
    }

    #[test]
    fn offer_selection_parses_kind_and_category() {
        assert_eq!(offer_selection(None, None).unwrap(), OfferSelection::All);
        assert_eq!(
            offer_selection(Some("attraction"), Some("pay_less_now")).unwrap(),
            OfferSelection::Attraction(Some(AttractionKind::PayLessNow))
        );
        assert!(offer_selection(Some("attraction"), Some("pipeline")).is_err());
        assert!(offer_selection(None, Some("pipeline")).is_err());
    }

    #[test]
    fn price_range_from_flags() {
        let r = price_range(Some(40_000), Some(10_000), None).unwrap();
        assert_eq!((r.min, r.max), (Money::new(10_000), Money::new(40_000)));
        assert!(!price_range(None, None, None).unwrap().is_filtered());
        assert!(price_range(None, None, Some("cheap")).is_err());
        assert_eq!(
            price_range(None, None, Some("£50k+")).unwrap().min,
            Money::new(50_000)
        );
    }

    #[test]
    fn bundle_rejects_unknown_features() {
        let c = Catalog::load_embedded().unwrap();
        assert!(parse_bundle(&c, &["dashboard".into(), "teleport".into()]).is_err());
        assert_eq!(parse_bundle(&c, &["dashboard".into(), "dashboard".into()]).unwrap().len(), 1);
    }

    #[test]
    fn bookmark_round_trip_through_commands() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = dir.path().join("prefs.json");
        let style = Style::plain();

        let out = run(&cli(&["bookmark", "complete"], &prefs), &style).unwrap();
        assert!(out.contains("bookmarked!"));

        let saved = run(&cli(&["saved"], &prefs), &style).unwrap();
        assert!(saved.contains("(complete)"));

        let out = run(&cli(&["bookmark", "complete"], &prefs), &style).unwrap();
        assert!(out.contains("Bookmark removed"));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = dir.path().join("prefs.json");
        assert!(run(&cli(&["like", "teleport"], &prefs), &Style::plain()).is_err());
        assert!(!prefs.exists());
    }

    #[test]
    fn corrupt_preferences_point_at_reset() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = dir.path().join("prefs.json");
        std::fs::write(&prefs, "[").unwrap();

        let err = run(&cli(&["saved"], &prefs), &Style::plain()).unwrap_err();
        assert!(format!("{err:#}").contains("saved --reset"));

        let out = run(&cli(&["saved", "--reset"], &prefs), &Style::plain()).unwrap();
        assert!(out.contains("(none)"));
    }

    #[test]
    fn search_json_is_an_array() {
        let dir = tempfile::tempdir().unwrap();
        let out = run(
            &cli(&["search", "Voice Cloning", "--json"], &dir.path().join("p.json")),
            &Style::plain(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["kind"], "feature");
    }
}
