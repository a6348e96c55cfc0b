//! Sheet and task generation driven by the preset catalog.
//!
//! Each requested sheet resolves a type and title from the chosen preset,
//! computes its date set, and is created through the host API before its
//! tasks are. Failures are collected per item; a failed sheet is skipped
//! (tasks and all), a failed task costs only itself.

use rand::Rng;
use rand::seq::SliceRandom;
use time::{Date, Duration, OffsetDateTime};
use tracing::{debug, info};

use signups::{NO_DATE, Role, SheetRequest, SheetType, SignupHost, TaskRequest, format_date};

use crate::config::SheetOptions;
use crate::data::names;
use crate::data::presets::{NeedDetails, Preset, PresetType, find_preset};
use crate::tracker::Tracker;

/// The acting operator, used as the fallback sheet author when no tracked
/// author-role account exists.
#[derive(Debug, Clone)]
pub struct Operator {
    pub id: u64,
    pub email: String,
}

/// A successfully created sheet. `task_count` reflects only tasks that the
/// host accepted.
#[derive(Debug, Clone)]
pub struct CreatedSheet {
    pub id: u64,
    pub title: String,
    pub sheet_type: SheetType,
    pub task_count: usize,
}

/// Outcome of one generation call.
#[derive(Debug, Default)]
pub struct SheetBatch {
    pub sheets: Vec<CreatedSheet>,
    pub errors: Vec<String>,
}

/// Resolved date set for one sheet. `first`/`last` are `None` for
/// open-ended sheets.
#[derive(Debug, Clone)]
struct SheetDates {
    first: Option<Date>,
    last: Option<Date>,
    all: Vec<Date>,
}

/// Creates sheets and their tasks from a preset scenario.
pub struct SheetGenerator {
    operator: Operator,
    base_date: Date,
}

impl SheetGenerator {
    pub fn new(operator: Operator) -> Self {
        Self {
            operator,
            base_date: OffsetDateTime::now_utc().date(),
        }
    }

    /// Pins "today" for the date-range arithmetic. Defaults to the current
    /// date.
    pub fn with_base_date(mut self, base_date: Date) -> Self {
        self.base_date = base_date;
        self
    }

    /// Generates `opts.count` sheets, each with a randomized number of tasks.
    pub async fn generate<R: Rng>(
        &self,
        opts: &SheetOptions,
        host: &dyn SignupHost,
        tracker: &Tracker<'_>,
        rng: &mut R,
    ) -> SheetBatch {
        let preset = find_preset(&opts.preset);
        let range_start = self.base_date + Duration::weeks(i64::from(opts.start_weeks));
        let range_end =
            self.base_date + Duration::weeks(i64::from(opts.start_weeks + opts.span_weeks));
        let (tasks_min, tasks_max) = opts.tasks_range();

        info!(
            "Generating {} sheets with preset '{}'...",
            opts.count, preset.key
        );

        let mut batch = SheetBatch::default();
        let mut used_titles: Vec<String> = Vec::new();

        for _ in 0..opts.count {
            let sheet_type = resolve_sheet_type(preset, opts.type_override, rng);
            let title = pick_title(preset, &used_titles, rng);
            used_titles.push(title.clone());

            let dates = generate_dates(sheet_type, range_start, range_end, rng);
            let (author_id, author_email) = self.pick_author(host, tracker, rng).await;
            let (chair_names, chair_emails) = random_chairs(rng);

            let req = SheetRequest {
                title: title.clone(),
                sheet_type,
                first_date: dates.first,
                last_date: dates.last,
                details: String::new(),
                visible: true,
                author_id,
                author_email,
                reminder1_days: 7,
                reminder2_days: 1,
                chair_names,
                chair_emails,
            };

            let sheet_id = match host.add_sheet(&req).await {
                Ok(id) => id,
                Err(e) => {
                    batch.errors.push(format!("Sheet error ({title}): {e}"));
                    continue;
                }
            };
            if let Err(e) = tracker.record_sheet(sheet_id).await {
                batch.errors.push(format!("Error tracking {title}: {e}"));
            }

            let task_count = rng.gen_range(tasks_min..=tasks_max);
            let task_titles = pick_task_titles(preset, task_count, rng);
            let mut tasks_created = 0;

            for (idx, task_title) in task_titles.iter().enumerate() {
                let need_details = resolve_need_details(preset, rng);
                let time_start = random_time(rng);
                let task_req = TaskRequest {
                    title: task_title.clone(),
                    dates: task_dates_string(sheet_type, &dates, idx),
                    qty: rng.gen_range(2..=8),
                    time_end: offset_time(&time_start, 2),
                    time_start,
                    need_details,
                    details_text: if need_details {
                        preset.details_text.to_string()
                    } else {
                        String::new()
                    },
                    allow_duplicates: false,
                };

                match host.add_task(&task_req, sheet_id).await {
                    Ok(_) => tasks_created += 1,
                    Err(e) => batch
                        .errors
                        .push(format!("Task error on sheet {sheet_id} ({task_title}): {e}")),
                }
            }

            debug!(
                "Created sheet {} '{}' ({}, {} tasks)",
                sheet_id, title, sheet_type, tasks_created
            );
            batch.sheets.push(CreatedSheet {
                id: sheet_id,
                title,
                sheet_type,
                task_count: tasks_created,
            });
        }

        info!(
            "Created {} sheets ({} errors)",
            batch.sheets.len(),
            batch.errors.len()
        );
        batch
    }

    /// Picks a random tracked author-role account, falling back to the
    /// acting operator when none is available.
    async fn pick_author<R: Rng>(
        &self,
        host: &dyn SignupHost,
        tracker: &Tracker<'_>,
        rng: &mut R,
    ) -> (u64, String) {
        if let Ok(tracked) = tracker.user_ids().await {
            if !tracked.is_empty() {
                if let Ok(authors) = host.accounts_with_role(Role::SheetAuthor, &tracked).await {
                    if !authors.is_empty() {
                        let pick = &authors[rng.gen_range(0..authors.len())];
                        return (pick.id, pick.email.clone());
                    }
                }
            }
        }
        (self.operator.id, self.operator.email.clone())
    }
}

fn resolve_sheet_type(
    preset: &Preset,
    type_override: Option<SheetType>,
    rng: &mut impl Rng,
) -> SheetType {
    match preset.sheet_type {
        PresetType::Fixed(sheet_type) => sheet_type,
        PresetType::Random => type_override
            .unwrap_or_else(|| SheetType::ALL[rng.gen_range(0..SheetType::ALL.len())]),
    }
}

/// Prefers an unused title from the preset pool; once the pool is exhausted
/// a reused title gets a small numeric suffix. The random preset synthesizes
/// adjective + noun titles instead.
fn pick_title(preset: &Preset, used: &[String], rng: &mut impl Rng) -> String {
    if preset.is_random() {
        let adj = preset.title_adjectives[rng.gen_range(0..preset.title_adjectives.len())];
        let noun = preset.title_nouns[rng.gen_range(0..preset.title_nouns.len())];
        return format!("{adj} {noun}");
    }

    let available: Vec<&&str> = preset
        .titles
        .iter()
        .filter(|t| !used.iter().any(|u| u == **t))
        .collect();
    if !available.is_empty() {
        return available[rng.gen_range(0..available.len())].to_string();
    }
    let base = preset.titles[rng.gen_range(0..preset.titles.len())];
    format!("{base} {}", rng.gen_range(2..=9))
}

fn pick_task_titles(preset: &Preset, count: u32, rng: &mut impl Rng) -> Vec<String> {
    if preset.is_random() {
        return (1..=count).map(|i| format!("Volunteer Slot {i}")).collect();
    }

    let mut pool: Vec<&str> = preset.tasks.to_vec();
    pool.shuffle(rng);
    // Wrap around when the sheet needs more tasks than the pool holds.
    (0..count as usize)
        .map(|i| pool[i % pool.len()].to_string())
        .collect()
}

fn resolve_need_details(preset: &Preset, rng: &mut impl Rng) -> bool {
    match preset.need_details {
        NeedDetails::Yes => true,
        NeedDetails::No => false,
        NeedDetails::Random => rng.gen_bool(0.5),
    }
}

/// Resolves a sheet's date set for its type within `[range_start, range_end]`.
fn generate_dates(
    sheet_type: SheetType,
    range_start: Date,
    range_end: Date,
    rng: &mut impl Rng,
) -> SheetDates {
    match sheet_type {
        SheetType::Ongoing => SheetDates {
            first: None,
            last: None,
            all: Vec::new(),
        },
        SheetType::Recurring => {
            // Weekly dates through the range, inclusive of the start.
            let mut dates = Vec::new();
            let mut cur = range_start;
            while cur <= range_end {
                dates.push(cur);
                cur += Duration::weeks(1);
            }
            if dates.is_empty() {
                dates.push(range_start);
            }
            SheetDates {
                first: dates.first().copied(),
                last: dates.last().copied(),
                all: dates,
            }
        }
        SheetType::MultiDay => {
            let num = rng.gen_range(2..=4);
            let span_days = (range_end - range_start).whole_days().max(0);
            let mut dates: Vec<Date> = Vec::with_capacity(num);
            for _ in 0..num {
                let mut attempts = 0;
                let mut day = range_start + Duration::days(rng.gen_range(0..=span_days));
                // Duplicates are accepted once the retry budget runs out.
                while dates.contains(&day) && attempts < 20 {
                    day = range_start + Duration::days(rng.gen_range(0..=span_days));
                    attempts += 1;
                }
                dates.push(day);
            }
            dates.sort();
            SheetDates {
                first: dates.first().copied(),
                last: dates.last().copied(),
                all: dates,
            }
        }
        SheetType::Single => {
            let span_days = (range_end - range_start).whole_days().max(0);
            let date = range_start + Duration::days(rng.gen_range(0..=span_days));
            SheetDates {
                first: Some(date),
                last: Some(date),
                all: vec![date],
            }
        }
    }
}

/// Builds the task `dates` wire string from the sheet's date set.
///
/// Multi-Day tasks get exactly one date each, cycling through the pool so
/// every date is represented; Single and Recurring tasks all share the full
/// date set; Ongoing tasks carry the no-date sentinel.
fn task_dates_string(sheet_type: SheetType, dates: &SheetDates, task_index: usize) -> String {
    match sheet_type {
        SheetType::Ongoing => NO_DATE.to_string(),
        SheetType::MultiDay if !dates.all.is_empty() => {
            format_date(dates.all[task_index % dates.all.len()])
        }
        _ => {
            if !dates.all.is_empty() {
                dates
                    .all
                    .iter()
                    .map(|d| format_date(*d))
                    .collect::<Vec<_>>()
                    .join(",")
            } else {
                dates
                    .first
                    .map(format_date)
                    .unwrap_or_else(|| NO_DATE.to_string())
            }
        }
    }
}

fn to_12_hour(hour24: u32) -> (u32, &'static str) {
    let ampm = if hour24 >= 12 { "pm" } else { "am" };
    let hour = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    (hour, ampm)
}

/// Random start time between 7:00 and 18:30 on the half hour, rendered
/// 12-hour with a zero-padded hour.
fn random_time(rng: &mut impl Rng) -> String {
    let hour = rng.gen_range(7u32..=18);
    let minute = if rng.gen_bool(0.5) { "30" } else { "00" };
    let (hour12, ampm) = to_12_hour(hour);
    format!("{hour12:02}:{minute} {ampm}")
}

fn parse_12_hour(time_str: &str) -> Option<u32> {
    let (clock, ampm) = time_str.split_once(' ')?;
    let (hour, minute) = clock.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour == 0 || hour > 12 || minute > 59 {
        return None;
    }
    let hour24 = match ampm {
        "am" => hour % 12,
        "pm" => hour % 12 + 12,
        _ => return None,
    };
    Some(hour24 * 60 + minute)
}

/// Offsets a 12-hour time string by whole hours, wrapping at midnight. The
/// result uses the host's unpadded render.
fn offset_time(time_str: &str, hours: u32) -> String {
    let Some(minutes) = parse_12_hour(time_str) else {
        return "11:00 am".to_string();
    };
    let total = (minutes + hours * 60) % (24 * 60);
    let (hour12, ampm) = to_12_hour(total / 60);
    format!("{}:{:02} {}", hour12, total % 60, ampm)
}

/// Synthesizes 1–3 chair contacts as parallel comma-joined strings.
fn random_chairs(rng: &mut impl Rng) -> (String, String) {
    let count = rng.gen_range(1..=3);
    let mut chair_names = Vec::with_capacity(count);
    let mut chair_emails = Vec::with_capacity(count);
    for _ in 0..count {
        let (first, last) = names::random_name_pair(rng);
        chair_names.push(format!("{first} {last}"));
        chair_emails.push(names::guest_email(first, last, rng));
    }
    (chair_names.join(", "), chair_emails.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use signups::MemoryHost;
    use time::Month;

    fn operator() -> Operator {
        Operator {
            id: 1,
            email: "admin@example.test".into(),
        }
    }

    fn base_date() -> Date {
        Date::from_calendar_date(2026, Month::March, 2).unwrap()
    }

    fn generator() -> SheetGenerator {
        SheetGenerator::new(operator()).with_base_date(base_date())
    }

    #[tokio::test]
    async fn test_bake_sale_scenario() {
        let host = MemoryHost::new();
        let tracker = Tracker::new(&host);
        let mut rng = rand::thread_rng();

        let opts = SheetOptions {
            preset: "bake_sale".into(),
            count: 3,
            tasks_min: 2,
            tasks_max: 5,
            start_weeks: 1,
            span_weeks: 4,
            type_override: None,
        };
        let batch = generator().generate(&opts, &host, &tracker, &mut rng).await;

        assert_eq!(batch.sheets.len(), 3);
        assert!(batch.errors.is_empty());
        assert_eq!(tracker.sheet_ids().await.unwrap().len(), 3);

        let pool = find_preset("bake_sale").tasks;
        let range_start = base_date() + Duration::weeks(1);
        let range_end = base_date() + Duration::weeks(5);

        for sheet in &batch.sheets {
            assert_eq!(sheet.sheet_type, SheetType::Single);
            assert!((2..=5).contains(&sheet.task_count));

            let tasks = host.tasks_for_sheet(sheet.id).await.unwrap();
            assert_eq!(tasks.len(), sheet.task_count);
            for task in &tasks {
                assert!(pool.contains(&task.title.as_str()));
                assert!((2..=8).contains(&task.qty));
                let dates = task.dates_list();
                assert_eq!(dates.len(), 1);
                let date = parse_wire_date(&dates[0]);
                assert!(date >= range_start && date <= range_end);
            }
        }
    }

    fn parse_wire_date(s: &str) -> Date {
        let mut parts = s.split('-');
        let year: i32 = parts.next().unwrap().parse().unwrap();
        let month: u8 = parts.next().unwrap().parse().unwrap();
        let day: u8 = parts.next().unwrap().parse().unwrap();
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    #[tokio::test]
    async fn test_sheet_count_attempts_are_exact() {
        let host = MemoryHost::new();
        let tracker = Tracker::new(&host);
        let mut rng = rand::thread_rng();

        let opts = SheetOptions {
            count: 0,
            ..Default::default()
        };
        let batch = generator().generate(&opts, &host, &tracker, &mut rng).await;
        assert!(batch.sheets.is_empty());
        assert!(tracker.sheet_ids().await.unwrap().is_empty());
    }

    #[test]
    fn test_resolve_type_pins_fixed_presets() {
        let mut rng = rand::thread_rng();
        let preset = find_preset("committee");
        for _ in 0..10 {
            assert_eq!(
                resolve_sheet_type(preset, Some(SheetType::Single), &mut rng),
                SheetType::Recurring
            );
        }
    }

    #[test]
    fn test_resolve_type_honors_override_for_random_preset() {
        let mut rng = rand::thread_rng();
        let preset = find_preset("random");
        for _ in 0..10 {
            assert_eq!(
                resolve_sheet_type(preset, Some(SheetType::Ongoing), &mut rng),
                SheetType::Ongoing
            );
            assert!(SheetType::ALL.contains(&resolve_sheet_type(preset, None, &mut rng)));
        }
    }

    #[test]
    fn test_recurring_dates_are_weekly() {
        let mut rng = rand::thread_rng();
        let start = base_date();
        let end = start + Duration::weeks(4);
        let dates = generate_dates(SheetType::Recurring, start, end, &mut rng);

        assert_eq!(dates.first, Some(start));
        assert_eq!(dates.all.len(), 5);
        for pair in dates.all.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::weeks(1));
        }
        assert!(dates.last.unwrap() <= end);
    }

    #[test]
    fn test_multi_day_dates_sorted_in_range() {
        let mut rng = rand::thread_rng();
        let start = base_date();
        let end = start + Duration::weeks(4);
        for _ in 0..50 {
            let dates = generate_dates(SheetType::MultiDay, start, end, &mut rng);
            assert!((2..=4).contains(&dates.all.len()));
            assert!(dates.all.windows(2).all(|p| p[0] <= p[1]));
            assert!(dates.first.unwrap() >= start);
            assert!(dates.last.unwrap() <= end);
            assert!(dates.first.unwrap() <= dates.last.unwrap());
        }
    }

    #[test]
    fn test_zero_span_single_date() {
        let mut rng = rand::thread_rng();
        let start = base_date();
        let dates = generate_dates(SheetType::Single, start, start, &mut rng);
        assert_eq!(dates.all, vec![start]);
    }

    #[test]
    fn test_ongoing_has_no_dates() {
        let mut rng = rand::thread_rng();
        let dates = generate_dates(
            SheetType::Ongoing,
            base_date(),
            base_date() + Duration::weeks(4),
            &mut rng,
        );
        assert!(dates.first.is_none());
        assert!(dates.last.is_none());
        assert!(dates.all.is_empty());
        assert_eq!(task_dates_string(SheetType::Ongoing, &dates, 0), NO_DATE);
    }

    #[test]
    fn test_multi_day_tasks_cycle_dates() {
        let dates = SheetDates {
            first: Some(base_date()),
            last: Some(base_date() + Duration::days(2)),
            all: vec![
                base_date(),
                base_date() + Duration::days(1),
                base_date() + Duration::days(2),
            ],
        };
        assert_eq!(
            task_dates_string(SheetType::MultiDay, &dates, 0),
            "2026-03-02"
        );
        assert_eq!(
            task_dates_string(SheetType::MultiDay, &dates, 1),
            "2026-03-03"
        );
        assert_eq!(
            task_dates_string(SheetType::MultiDay, &dates, 3),
            "2026-03-02"
        );
    }

    #[test]
    fn test_shared_dates_join_with_commas() {
        let dates = SheetDates {
            first: Some(base_date()),
            last: Some(base_date() + Duration::weeks(1)),
            all: vec![base_date(), base_date() + Duration::weeks(1)],
        };
        assert_eq!(
            task_dates_string(SheetType::Recurring, &dates, 2),
            "2026-03-02,2026-03-09"
        );
    }

    #[test]
    fn test_title_pool_exhaustion_appends_suffix() {
        let mut rng = rand::thread_rng();
        let preset = find_preset("bake_sale");
        let mut used: Vec<String> = Vec::new();
        for _ in 0..4 {
            let title = pick_title(preset, &used, &mut rng);
            assert!(!used.contains(&title));
            used.push(title);
        }
        let overflow = pick_title(preset, &used, &mut rng);
        let (base, suffix) = overflow.rsplit_once(' ').unwrap();
        assert!(preset.titles.contains(&base));
        let suffix: u32 = suffix.parse().unwrap();
        assert!((2..=9).contains(&suffix));
    }

    #[test]
    fn test_random_preset_titles_use_pools() {
        let mut rng = rand::thread_rng();
        let preset = find_preset("random");
        let title = pick_title(preset, &[], &mut rng);
        let (adj, noun) = title.split_once(' ').unwrap();
        assert!(preset.title_adjectives.contains(&adj));
        assert!(preset.title_nouns.contains(&noun));
    }

    #[test]
    fn test_task_titles_wrap_pool() {
        let mut rng = rand::thread_rng();
        let preset = find_preset("committee");
        let titles = pick_task_titles(preset, 10, &mut rng);
        assert_eq!(titles.len(), 10);
        // 6-item pool cycled: the first six are distinct.
        let unique: std::collections::HashSet<_> = titles[..6].iter().collect();
        assert_eq!(unique.len(), 6);
        for title in &titles {
            assert!(preset.tasks.contains(&title.as_str()));
        }
    }

    #[test]
    fn test_random_preset_task_titles_are_numbered() {
        let mut rng = rand::thread_rng();
        let titles = pick_task_titles(find_preset("random"), 3, &mut rng);
        assert_eq!(
            titles,
            vec!["Volunteer Slot 1", "Volunteer Slot 2", "Volunteer Slot 3"]
        );
    }

    #[test]
    fn test_time_rendering() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let time = random_time(&mut rng);
            let minutes = parse_12_hour(&time).unwrap();
            assert!((7 * 60..=18 * 60 + 30).contains(&minutes));
            assert!(minutes % 30 == 0);
        }

        assert_eq!(offset_time("07:30 am", 2), "9:30 am");
        assert_eq!(offset_time("11:00 am", 2), "1:00 pm");
        assert_eq!(offset_time("06:00 pm", 2), "8:00 pm");
        assert_eq!(offset_time("not a time", 2), "11:00 am");
    }

    #[test]
    fn test_chairs_are_parallel_lists() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let (names, emails) = random_chairs(&mut rng);
            let name_count = names.split(", ").count();
            let email_count = emails.split(", ").count();
            assert_eq!(name_count, email_count);
            assert!((1..=3).contains(&name_count));
            for email in emails.split(", ") {
                assert!(email.ends_with("@example.test"));
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_preset_falls_back_to_random() {
        let host = MemoryHost::new();
        let tracker = Tracker::new(&host);
        let mut rng = rand::thread_rng();

        let opts = SheetOptions {
            preset: "car_wash".into(),
            count: 5,
            ..Default::default()
        };
        let batch = generator().generate(&opts, &host, &tracker, &mut rng).await;

        assert_eq!(batch.sheets.len(), 5);
        for sheet in &batch.sheets {
            assert!(SheetType::ALL.contains(&sheet.sheet_type));
        }
    }
}
