// Sector/Geography Aggregator
// Raw-sector rollups, Dutch city/province/hub analysis, the strategic
// Deep Tech / Digital / Other split, and peer/regional benchmarks.

use crate::model::{percentage, ratio, CompanyRecord, GroupStats};
use crate::provinces::{province_for_city, ALL_PROVINCES};
use crate::sectors::SectorCategory;
use std::collections::BTreeMap;

/// Peer benchmark countries, in display order.
pub const BENCHMARK_COUNTRIES: [(&str, &str); 6] = [
    ("USA", "United States"),
    ("GBR", "United Kingdom"),
    ("DEU", "Germany"),
    ("NLD", "Netherlands"),
    ("ISR", "Israel"),
    ("FRA", "France"),
];

/// Dutch hub cities tracked individually.
pub const HUB_CITIES: [&str; 5] = ["Amsterdam", "Eindhoven", "Rotterdam", "Delft", "Utrecht"];

const EUROPE_EXCL_NLD_DEU_GBR: [&str; 14] = [
    "FRA", "ESP", "ITA", "SWE", "CHE", "BEL", "AUT", "DNK", "NOR", "FIN", "IRL", "PRT", "POL",
    "CZE",
];
const ASIA_EXCL_CHINA: [&str; 11] = [
    "JPN", "KOR", "SGP", "IND", "HKG", "TWN", "IDN", "THA", "VNM", "MYS", "PHL",
];

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// Per-sector rollup over the raw sector label (not the strategic
/// category - labels are preserved for display).
#[derive(Debug, Clone)]
pub struct SectorRollup {
    pub sector: String,
    pub company_count: usize,
    pub total_funding: f64,
    pub avg_funding: f64,
    pub dutch_company_count: usize,
    pub dutch_total_funding: f64,
    pub dutch_avg_funding: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CityStats {
    pub city: String,
    pub province: String,
    pub company_count: usize,
    pub total_funding: f64,
    pub deep_tech_count: usize,
    pub deep_tech_funding: f64,
    /// Count-basis intensity; a city group is never empty so this is
    /// always defined.
    pub deep_tech_intensity: f64,
}

#[derive(Debug, Clone)]
pub struct ProvinceStats {
    pub province: &'static str,
    pub company_count: usize,
    pub total_funding: f64,
    pub deep_tech_count: usize,
    pub deep_tech_funding: f64,
    /// Absent for provinces with no companies, never a zero sentinel.
    pub deep_tech_intensity: Option<f64>,
    pub highlight: &'static str,
}

#[derive(Debug, Clone)]
pub struct HubStats {
    pub city: &'static str,
    pub company_count: usize,
    pub total_funding: f64,
    pub avg_funding: f64,
    pub deep_tech_count: usize,
    pub deep_tech_funding: f64,
    /// Count-basis and funding-basis intensities are distinct metrics and
    /// are never conflated.
    pub deep_tech_intensity_count: f64,
    pub deep_tech_intensity_funding: Option<f64>,
}

/// Funding and company totals partitioned by strategic category.
#[derive(Debug, Clone, Default)]
pub struct StrategicSplit {
    pub deep_tech_funding: f64,
    pub digital_funding: f64,
    pub other_funding: f64,
    pub deep_tech_companies: usize,
    pub digital_companies: usize,
    pub other_companies: usize,
}

/// Outcome metrics for one strategic category within one population.
#[derive(Debug, Clone)]
pub struct CategoryMetrics {
    pub count: usize,
    pub acquired_rate: f64,
    pub operating_rate: f64,
    pub closed_rate: f64,
    pub avg_funding: f64,
    pub total_funding: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryBreakdown {
    pub deep_tech: Option<CategoryMetrics>,
    pub digital: Option<CategoryMetrics>,
    pub other: Option<CategoryMetrics>,
}

#[derive(Debug, Clone, Default)]
pub struct TimeToScale {
    pub multi_round_count: usize,
    pub single_round_count: usize,
    pub single_round_pct: Option<f64>,
    pub avg_days: Option<f64>,
    pub median_days: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlineInsights {
    /// Dutch Deep Tech acquisition rate over Dutch Digital acquisition rate.
    pub deep_tech_acquisition_advantage: f64,
    /// Dutch minus global Deep Tech acquisition rate, in points.
    pub dutch_vs_global_deep_tech_delta: f64,
    pub amsterdam_concentration: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct PeerStats {
    pub country: &'static str,
    pub country_name: &'static str,
    pub stats: GroupStats,
}

#[derive(Debug, Clone)]
pub struct RegionalStats {
    pub region: &'static str,
    pub stats: GroupStats,
}

#[derive(Debug)]
pub struct GeographyOutput {
    /// Sorted descending by company count.
    pub sectors: Vec<SectorRollup>,
    /// Dutch funding/company split by strategic category.
    pub split: StrategicSplit,
    /// All Dutch cities, sorted descending by total funding.
    pub cities: Vec<CityStats>,
    /// All twelve provinces, sorted descending by total funding.
    pub provinces: Vec<ProvinceStats>,
    pub hubs: Vec<HubStats>,
    pub dutch_breakdown: CategoryBreakdown,
    pub global_breakdown: CategoryBreakdown,
    pub time_to_scale: TimeToScale,
    pub headline: HeadlineInsights,
    pub peers: Vec<PeerStats>,
    pub regional: Vec<RegionalStats>,
}

pub fn analyze(records: &[CompanyRecord]) -> GeographyOutput {
    let dutch: Vec<&CompanyRecord> = records.iter().filter(|r| r.is_dutch()).collect();

    let cities = city_rollup(&dutch);
    let provinces = province_rollup(&cities);
    let dutch_breakdown = category_breakdown(&dutch);
    let global_breakdown = category_breakdown(&records.iter().collect::<Vec<_>>());

    GeographyOutput {
        sectors: sector_rollup(records),
        split: strategic_split(&dutch),
        hubs: hub_rollup(&dutch),
        headline: headline_insights(&dutch, &dutch_breakdown, &global_breakdown),
        time_to_scale: time_to_scale(&dutch),
        cities,
        provinces,
        dutch_breakdown,
        global_breakdown,
        peers: peer_rollup(records),
        regional: regional_rollup(records),
    }
}

// ============================================================================
// SECTOR ROLLUP
// ============================================================================

fn sector_rollup(records: &[CompanyRecord]) -> Vec<SectorRollup> {
    let mut groups: BTreeMap<&str, Vec<&CompanyRecord>> = BTreeMap::new();
    for record in records {
        if let Some(sector) = record.sector.as_deref() {
            if !sector.is_empty() {
                groups.entry(sector).or_default().push(record);
            }
        }
    }

    let mut rollups: Vec<SectorRollup> = groups
        .into_iter()
        .map(|(sector, group)| {
            let stats = GroupStats::collect(group.iter().copied());
            let dutch = GroupStats::collect(group.iter().copied().filter(|r| r.is_dutch()));
            SectorRollup {
                sector: sector.to_string(),
                company_count: stats.company_count,
                total_funding: stats.total_funding,
                avg_funding: stats.avg_funding.unwrap_or(0.0),
                dutch_company_count: dutch.company_count,
                dutch_total_funding: dutch.total_funding,
                dutch_avg_funding: dutch.avg_funding,
            }
        })
        .collect();

    // Descending by company count; sector name breaks ties so output is
    // stable across runs.
    rollups.sort_by(|a, b| {
        b.company_count
            .cmp(&a.company_count)
            .then_with(|| a.sector.cmp(&b.sector))
    });
    rollups
}

// ============================================================================
// STRATEGIC SPLIT & CATEGORY METRICS
// ============================================================================

fn strategic_split(dutch: &[&CompanyRecord]) -> StrategicSplit {
    let mut split = StrategicSplit::default();
    for record in dutch {
        let funding = record.total_funding();
        match record.sector_category {
            SectorCategory::DeepTech => {
                split.deep_tech_funding += funding;
                split.deep_tech_companies += 1;
            }
            SectorCategory::Digital => {
                split.digital_funding += funding;
                split.digital_companies += 1;
            }
            SectorCategory::Other => {
                split.other_funding += funding;
                split.other_companies += 1;
            }
        }
    }
    split
}

fn category_metrics(records: &[&CompanyRecord], category: SectorCategory) -> Option<CategoryMetrics> {
    let group: Vec<&CompanyRecord> = records
        .iter()
        .copied()
        .filter(|r| r.sector_category == category)
        .collect();
    if group.is_empty() {
        return None;
    }
    let stats = GroupStats::collect(group);
    Some(CategoryMetrics {
        count: stats.company_count,
        acquired_rate: stats.acquired_rate.unwrap_or(0.0),
        operating_rate: stats.operating_rate.unwrap_or(0.0),
        closed_rate: stats.closed_rate.unwrap_or(0.0),
        avg_funding: stats.avg_funding.unwrap_or(0.0),
        total_funding: stats.total_funding,
    })
}

fn category_breakdown(records: &[&CompanyRecord]) -> CategoryBreakdown {
    CategoryBreakdown {
        deep_tech: category_metrics(records, SectorCategory::DeepTech),
        digital: category_metrics(records, SectorCategory::Digital),
        other: category_metrics(records, SectorCategory::Other),
    }
}

// ============================================================================
// CITIES, PROVINCES, HUBS
// ============================================================================

fn city_rollup(dutch: &[&CompanyRecord]) -> Vec<CityStats> {
    let mut groups: BTreeMap<&str, Vec<&CompanyRecord>> = BTreeMap::new();
    for record in dutch {
        if let Some(city) = record.city.as_deref() {
            let city = city.trim();
            if city.len() >= 2 {
                groups.entry(city).or_default().push(*record);
            }
        }
    }

    let mut cities: Vec<CityStats> = groups
        .into_iter()
        .filter_map(|(city, group)| {
            let total_funding: f64 = group.iter().map(|r| r.total_funding()).sum();
            // Noise filter: single unfunded companies don't make a city.
            if total_funding == 0.0 && group.len() < 2 {
                return None;
            }
            let deep_tech: Vec<&&CompanyRecord> = group
                .iter()
                .filter(|r| r.sector_category == SectorCategory::DeepTech)
                .collect();
            let deep_tech_funding: f64 = deep_tech.iter().map(|r| r.total_funding()).sum();
            // The record's cached province is authoritative; the city table
            // only fills the gap when the source had no province column.
            let province = group
                .iter()
                .find_map(|r| r.province.clone())
                .or_else(|| province_for_city(city).map(|p| p.to_string()))
                .unwrap_or_else(|| "Other".to_string());
            Some(CityStats {
                city: city.to_string(),
                province,
                company_count: group.len(),
                total_funding,
                deep_tech_count: deep_tech.len(),
                deep_tech_funding,
                deep_tech_intensity: percentage(deep_tech.len(), group.len()).unwrap_or(0.0),
            })
        })
        .collect();

    cities.sort_by(|a, b| {
        b.total_funding
            .partial_cmp(&a.total_funding)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.city.cmp(&b.city))
    });
    cities
}

fn province_rollup(cities: &[CityStats]) -> Vec<ProvinceStats> {
    let mut totals: BTreeMap<&str, (usize, f64, usize, f64)> = BTreeMap::new();
    for province in ALL_PROVINCES {
        totals.insert(province, (0, 0.0, 0, 0.0));
    }
    for city in cities {
        if let Some(entry) = totals.get_mut(city.province.as_str()) {
            entry.0 += city.company_count;
            entry.1 += city.total_funding;
            entry.2 += city.deep_tech_count;
            entry.3 += city.deep_tech_funding;
        }
    }

    let all_companies: usize = totals.values().map(|t| t.0).sum();
    let all_deep_tech: usize = totals.values().map(|t| t.2).sum();
    let avg_intensity = percentage(all_deep_tech, all_companies).unwrap_or(0.0);

    let mut provinces: Vec<ProvinceStats> = ALL_PROVINCES
        .into_iter()
        .map(|province| {
            let (company_count, total_funding, deep_tech_count, deep_tech_funding) =
                totals[province];
            let intensity = percentage(deep_tech_count, company_count);
            ProvinceStats {
                province,
                company_count,
                total_funding,
                deep_tech_count,
                deep_tech_funding,
                deep_tech_intensity: intensity,
                highlight: highlight_for(
                    company_count,
                    total_funding,
                    intensity.unwrap_or(0.0),
                    avg_intensity,
                ),
            }
        })
        .collect();

    provinces.sort_by(|a, b| {
        b.total_funding
            .partial_cmp(&a.total_funding)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.province.cmp(b.province))
    });
    provinces
}

/// Insight label for a province, from the fixed threshold ladder.
fn highlight_for(
    company_count: usize,
    total_funding: f64,
    intensity: f64,
    avg_intensity: f64,
) -> &'static str {
    if company_count == 0 {
        "No Data Available"
    } else if total_funding > 500_000_000.0 {
        "Major Capital Hub"
    } else if intensity > 25.0 {
        "Deep Tech Hotspot"
    } else if intensity > avg_intensity + 5.0 {
        "Innovation Cluster"
    } else if company_count > 20 && total_funding < 10_000_000.0 {
        "Capital Efficient"
    } else {
        "Emerging Ecosystem"
    }
}

fn hub_rollup(dutch: &[&CompanyRecord]) -> Vec<HubStats> {
    HUB_CITIES
        .iter()
        .filter_map(|&hub| {
            let hub_lower = hub.to_lowercase();
            let group: Vec<&&CompanyRecord> = dutch
                .iter()
                .filter(|r| {
                    r.city
                        .as_deref()
                        .map(|c| c.to_lowercase().contains(&hub_lower))
                        .unwrap_or(false)
                })
                .collect();
            if group.is_empty() {
                return None;
            }
            let total_funding: f64 = group.iter().map(|r| r.total_funding()).sum();
            let deep_tech: Vec<&&&CompanyRecord> = group
                .iter()
                .filter(|r| r.sector_category == SectorCategory::DeepTech)
                .collect();
            let deep_tech_funding: f64 = deep_tech.iter().map(|r| r.total_funding()).sum();
            Some(HubStats {
                city: hub,
                company_count: group.len(),
                total_funding,
                avg_funding: ratio(total_funding, group.len()).unwrap_or(0.0),
                deep_tech_count: deep_tech.len(),
                deep_tech_funding,
                deep_tech_intensity_count: percentage(deep_tech.len(), group.len())
                    .unwrap_or(0.0),
                deep_tech_intensity_funding: if total_funding > 0.0 {
                    Some(deep_tech_funding / total_funding * 100.0)
                } else {
                    None
                },
            })
        })
        .collect()
}

// ============================================================================
// TIME TO SCALE & HEADLINE INSIGHTS
// ============================================================================

fn time_to_scale(dutch: &[&CompanyRecord]) -> TimeToScale {
    let funded: Vec<&&CompanyRecord> = dutch.iter().filter(|r| r.has_rounds()).collect();
    let multi: Vec<&&&CompanyRecord> = funded.iter().filter(|r| r.round_count() > 1).collect();
    let single_round_count = funded.len() - multi.len();

    let mut spans: Vec<f64> = multi
        .iter()
        .filter_map(|r| r.funding_span_days())
        .map(|d| d as f64)
        .collect();
    spans.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let avg_days = if spans.is_empty() {
        None
    } else {
        Some(spans.iter().sum::<f64>() / spans.len() as f64)
    };
    let median_days = if spans.is_empty() {
        None
    } else {
        let mid = spans.len() / 2;
        Some(if spans.len() % 2 == 0 {
            (spans[mid - 1] + spans[mid]) / 2.0
        } else {
            spans[mid]
        })
    };

    TimeToScale {
        multi_round_count: multi.len(),
        single_round_count,
        single_round_pct: percentage(single_round_count, funded.len()),
        avg_days,
        median_days,
    }
}

fn headline_insights(
    dutch: &[&CompanyRecord],
    dutch_breakdown: &CategoryBreakdown,
    global_breakdown: &CategoryBreakdown,
) -> HeadlineInsights {
    let dutch_deep_tech_acquired = dutch_breakdown
        .deep_tech
        .as_ref()
        .map(|m| m.acquired_rate)
        .unwrap_or(0.0);
    let dutch_digital_acquired = dutch_breakdown
        .digital
        .as_ref()
        .map(|m| m.acquired_rate)
        .filter(|rate| *rate > 0.0)
        .unwrap_or(1.0);
    let global_deep_tech_acquired = global_breakdown
        .deep_tech
        .as_ref()
        .map(|m| m.acquired_rate)
        .unwrap_or(0.0);

    let amsterdam = dutch
        .iter()
        .filter(|r| r.city.as_deref() == Some("Amsterdam"))
        .count();

    HeadlineInsights {
        deep_tech_acquisition_advantage: dutch_deep_tech_acquired / dutch_digital_acquired,
        dutch_vs_global_deep_tech_delta: dutch_deep_tech_acquired - global_deep_tech_acquired,
        amsterdam_concentration: percentage(amsterdam, dutch.len()),
    }
}

// ============================================================================
// PEERS & REGIONS
// ============================================================================

fn peer_rollup(records: &[CompanyRecord]) -> Vec<PeerStats> {
    BENCHMARK_COUNTRIES
        .iter()
        .filter_map(|&(code, name)| {
            let stats = GroupStats::collect(records.iter().filter(|r| r.country == *code));
            if stats.is_empty() {
                return None;
            }
            Some(PeerStats {
                country: code,
                country_name: name,
                stats,
            })
        })
        .collect()
}

fn regional_rollup(records: &[CompanyRecord]) -> Vec<RegionalStats> {
    let nld = ["NLD"];
    let usa = ["USA"];
    let deu = ["DEU"];
    let chn = ["CHN"];
    let regions: [(&'static str, &[&str]); 6] = [
        ("Netherlands", &nld),
        ("United States", &usa),
        ("Germany", &deu),
        ("Rest of Europe", &EUROPE_EXCL_NLD_DEU_GBR),
        ("Asia", &ASIA_EXCL_CHINA),
        ("China", &chn),
    ];

    regions
        .into_iter()
        .filter_map(|(region, codes)| {
            let stats = GroupStats::collect(
                records
                    .iter()
                    .filter(|r| codes.contains(&r.country.as_str())),
            );
            if stats.is_empty() {
                return None;
            }
            Some(RegionalStats { region, stats })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompanyStatus, FundingRound};

    struct Fixture {
        id: usize,
        records: Vec<CompanyRecord>,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                id: 0,
                records: Vec::new(),
            }
        }

        fn add(
            &mut self,
            country: &str,
            city: Option<&str>,
            sector: &str,
            category: SectorCategory,
            status: CompanyStatus,
            funding: f64,
        ) {
            self.id += 1;
            self.records.push(CompanyRecord {
                id: format!("c{}", self.id),
                name: format!("c{}", self.id),
                country: country.to_string(),
                city: city.map(|c| c.to_string()),
                province: None,
                founded_year: Some(2010),
                sector: Some(sector.to_string()),
                sector_category: category,
                status,
                rounds: vec![FundingRound {
                    round_index: 1,
                    amount: funding,
                    date: None,
                }],
            });
        }
    }

    #[test]
    fn test_intensity_count_and_funding_basis_diverge() {
        // 1 Deep Tech company with $100, 1 Digital with $900: count-basis
        // intensity is 50%, funding-basis is 10%. The two are distinct.
        let mut fx = Fixture::new();
        fx.add(
            "NLD",
            Some("Delft"),
            "Robotics",
            SectorCategory::DeepTech,
            CompanyStatus::Operating,
            100.0,
        );
        fx.add(
            "NLD",
            Some("Delft"),
            "Software",
            SectorCategory::Digital,
            CompanyStatus::Operating,
            900.0,
        );
        let dutch: Vec<&CompanyRecord> = fx.records.iter().collect();
        let hubs = hub_rollup(&dutch);
        assert_eq!(hubs.len(), 1);
        assert_eq!(hubs[0].city, "Delft");
        assert_eq!(hubs[0].deep_tech_intensity_count, 50.0);
        assert_eq!(hubs[0].deep_tech_intensity_funding, Some(10.0));
    }

    #[test]
    fn test_city_rollup_and_province_mapping() {
        let mut fx = Fixture::new();
        fx.add(
            "NLD",
            Some("Amsterdam"),
            "Software",
            SectorCategory::Digital,
            CompanyStatus::Operating,
            5e6,
        );
        fx.add(
            "NLD",
            Some("Amsterdam"),
            "Biotechnology",
            SectorCategory::DeepTech,
            CompanyStatus::Operating,
            1e6,
        );
        fx.add(
            "NLD",
            Some("Eindhoven"),
            "Semiconductors",
            SectorCategory::DeepTech,
            CompanyStatus::Operating,
            9e6,
        );
        let dutch: Vec<&CompanyRecord> = fx.records.iter().collect();
        let cities = city_rollup(&dutch);

        assert_eq!(cities.len(), 2);
        // Sorted descending by total funding.
        assert_eq!(cities[0].city, "Eindhoven");
        assert_eq!(cities[0].province, "North Brabant");
        assert_eq!(cities[0].deep_tech_intensity, 100.0);
        assert_eq!(cities[1].city, "Amsterdam");
        assert_eq!(cities[1].company_count, 2);
        assert_eq!(cities[1].deep_tech_count, 1);
        assert_eq!(cities[1].deep_tech_intensity, 50.0);
        assert_eq!(cities[1].deep_tech_funding, 1e6);
    }

    #[test]
    fn test_explicit_province_survives_unmapped_city() {
        // A record whose city is absent from the lookup table still lands
        // in its recorded province.
        let mut fx = Fixture::new();
        fx.add(
            "NLD",
            Some("Unknowntown"),
            "Software",
            SectorCategory::Digital,
            CompanyStatus::Operating,
            1e6,
        );
        fx.records.last_mut().unwrap().province = Some("Utrecht".to_string());

        let dutch: Vec<&CompanyRecord> = fx.records.iter().collect();
        let cities = city_rollup(&dutch);
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].province, "Utrecht");

        let provinces = province_rollup(&cities);
        let utrecht = provinces.iter().find(|p| p.province == "Utrecht").unwrap();
        assert_eq!(utrecht.company_count, 1);
        assert_eq!(utrecht.total_funding, 1e6);
    }

    #[test]
    fn test_city_noise_filter() {
        let mut fx = Fixture::new();
        fx.add(
            "NLD",
            Some("Joure"),
            "Software",
            SectorCategory::Digital,
            CompanyStatus::Operating,
            0.0,
        );
        let dutch: Vec<&CompanyRecord> = fx.records.iter().collect();
        assert!(city_rollup(&dutch).is_empty());
    }

    #[test]
    fn test_all_twelve_provinces_present() {
        let mut fx = Fixture::new();
        fx.add(
            "NLD",
            Some("Amsterdam"),
            "Software",
            SectorCategory::Digital,
            CompanyStatus::Operating,
            1e6,
        );
        let dutch: Vec<&CompanyRecord> = fx.records.iter().collect();
        let provinces = province_rollup(&city_rollup(&dutch));
        assert_eq!(provinces.len(), 12);

        let north_holland = provinces
            .iter()
            .find(|p| p.province == "North Holland")
            .unwrap();
        assert_eq!(north_holland.company_count, 1);

        let zeeland = provinces.iter().find(|p| p.province == "Zeeland").unwrap();
        assert_eq!(zeeland.company_count, 0);
        // Empty province: intensity is absent, not zero.
        assert_eq!(zeeland.deep_tech_intensity, None);
        assert_eq!(zeeland.highlight, "No Data Available");
    }

    #[test]
    fn test_highlight_ladder() {
        assert_eq!(highlight_for(0, 0.0, 0.0, 0.0), "No Data Available");
        assert_eq!(highlight_for(10, 6e8, 0.0, 0.0), "Major Capital Hub");
        assert_eq!(highlight_for(10, 1e6, 30.0, 10.0), "Deep Tech Hotspot");
        assert_eq!(highlight_for(10, 1e6, 20.0, 10.0), "Innovation Cluster");
        assert_eq!(highlight_for(25, 5e6, 10.0, 10.0), "Capital Efficient");
        assert_eq!(highlight_for(5, 5e7, 10.0, 10.0), "Emerging Ecosystem");
    }

    #[test]
    fn test_sector_rollup_sorted_by_count() {
        let mut fx = Fixture::new();
        fx.add("USA", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 2e6);
        fx.add("USA", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 4e6);
        fx.add("NLD", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 3e6);
        fx.add("NLD", None, "Biotechnology", SectorCategory::DeepTech, CompanyStatus::Operating, 8e6);

        let sectors = sector_rollup(&fx.records);
        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].sector, "Software");
        assert_eq!(sectors[0].company_count, 3);
        assert_eq!(sectors[0].avg_funding, 3e6);
        assert_eq!(sectors[0].dutch_company_count, 1);
        assert_eq!(sectors[0].dutch_total_funding, 3e6);
        assert_eq!(sectors[1].sector, "Biotechnology");
        assert_eq!(sectors[1].dutch_avg_funding, Some(8e6));
    }

    #[test]
    fn test_strategic_split() {
        let mut fx = Fixture::new();
        fx.add("NLD", None, "Robotics", SectorCategory::DeepTech, CompanyStatus::Operating, 100.0);
        fx.add("NLD", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 900.0);
        fx.add("NLD", None, "Finance", SectorCategory::Other, CompanyStatus::Operating, 50.0);
        let dutch: Vec<&CompanyRecord> = fx.records.iter().collect();
        let split = strategic_split(&dutch);
        assert_eq!(split.deep_tech_funding, 100.0);
        assert_eq!(split.digital_funding, 900.0);
        assert_eq!(split.other_funding, 50.0);
        assert_eq!(split.deep_tech_companies, 1);
        assert_eq!(split.digital_companies, 1);
        assert_eq!(split.other_companies, 1);
    }

    #[test]
    fn test_category_breakdown_absent_for_empty_category() {
        let mut fx = Fixture::new();
        fx.add("NLD", None, "Software", SectorCategory::Digital, CompanyStatus::Acquired, 1e6);
        let dutch: Vec<&CompanyRecord> = fx.records.iter().collect();
        let breakdown = category_breakdown(&dutch);
        assert!(breakdown.deep_tech.is_none());
        let digital = breakdown.digital.unwrap();
        assert_eq!(digital.count, 1);
        assert_eq!(digital.acquired_rate, 100.0);
    }

    #[test]
    fn test_headline_insights() {
        let mut fx = Fixture::new();
        // Dutch: Deep Tech 100% acquired, Digital 50% acquired.
        fx.add("NLD", Some("Amsterdam"), "Robotics", SectorCategory::DeepTech, CompanyStatus::Acquired, 1e6);
        fx.add("NLD", None, "Software", SectorCategory::Digital, CompanyStatus::Acquired, 1e6);
        fx.add("NLD", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 1e6);
        // Global deep tech also includes a US operating company: 50%.
        fx.add("USA", None, "Robotics", SectorCategory::DeepTech, CompanyStatus::Operating, 1e6);

        let records = fx.records;
        let dutch: Vec<&CompanyRecord> = records.iter().filter(|r| r.is_dutch()).collect();
        let dutch_breakdown = category_breakdown(&dutch);
        let global_breakdown = category_breakdown(&records.iter().collect::<Vec<_>>());
        let headline = headline_insights(&dutch, &dutch_breakdown, &global_breakdown);

        assert_eq!(headline.deep_tech_acquisition_advantage, 2.0);
        assert_eq!(headline.dutch_vs_global_deep_tech_delta, 50.0);
        assert!((headline.amsterdam_concentration.unwrap() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_to_scale() {
        let mut fx = Fixture::new();
        fx.add("NLD", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 1e6);
        fx.add("NLD", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 1e6);
        // Give the second company a second, dated round.
        let last = fx.records.last_mut().unwrap();
        last.rounds[0].date = chrono::NaiveDate::from_ymd_opt(2010, 1, 1);
        last.rounds.push(FundingRound {
            round_index: 2,
            amount: 2e6,
            date: chrono::NaiveDate::from_ymd_opt(2011, 1, 1),
        });

        let dutch: Vec<&CompanyRecord> = fx.records.iter().collect();
        let tts = time_to_scale(&dutch);
        assert_eq!(tts.multi_round_count, 1);
        assert_eq!(tts.single_round_count, 1);
        assert_eq!(tts.single_round_pct, Some(50.0));
        assert_eq!(tts.avg_days, Some(365.0));
        assert_eq!(tts.median_days, Some(365.0));
    }

    #[test]
    fn test_peer_rollup_omits_empty_countries() {
        let mut fx = Fixture::new();
        fx.add("USA", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 1e6);
        fx.add("NLD", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 2e6);
        let peers = peer_rollup(&fx.records);
        assert_eq!(peers.len(), 2);
        assert_eq!(peers[0].country, "USA");
        assert_eq!(peers[0].country_name, "United States");
        assert_eq!(peers[1].country, "NLD");
    }

    #[test]
    fn test_regional_rollup_groups() {
        let mut fx = Fixture::new();
        fx.add("NLD", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 1e6);
        fx.add("SWE", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 2e6);
        fx.add("BEL", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 3e6);
        fx.add("JPN", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 4e6);
        fx.add("CHN", None, "Software", SectorCategory::Digital, CompanyStatus::Operating, 5e6);

        let regional = regional_rollup(&fx.records);
        let names: Vec<&str> = regional.iter().map(|r| r.region).collect();
        assert_eq!(names, vec!["Netherlands", "Rest of Europe", "Asia", "China"]);
        let europe = &regional[1];
        assert_eq!(europe.stats.company_count, 2);
        assert_eq!(europe.stats.total_funding, 5e6);
    }
}
