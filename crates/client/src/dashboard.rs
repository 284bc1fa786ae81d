//! Admin dashboard figures.
//!
//! Counts come from the list endpoints and are required; the sales figures
//! come from `/sales/stats` and fall back to zeros when that call fails, so
//! a reporting outage never blanks the whole dashboard.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use storefront_core::sale::DAILY_WINDOW_DAYS;
use storefront_core::submission::SubmissionStatus;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::types::{DailyTotal, MonthlyTotal, ProductQuery, SaleQuery, SalesStats};

/// One point of the daily sales chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub total: f64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_inquiries: usize,
    pub pending_inquiries: usize,
    pub total_contacts: usize,
    pub pending_contacts: usize,
    pub total_business_enquiries: usize,
    pub pending_business_enquiries: usize,
    pub total_sales: f64,
    pub current_month_sales: f64,
    /// The last seven days ending today, oldest first, zero-filled.
    pub daily_sales: Vec<DayPoint>,
    pub monthly_sales: Vec<MonthlyTotal>,
}

/// Gather everything the dashboard shows.
pub async fn load(client: &ApiClient) -> Result<DashboardSummary, ClientError> {
    let product_query = ProductQuery::default();
    let (products, inquiries, contacts, enquiries) = tokio::try_join!(
        client.list_products(&product_query),
        client.list_inquiries(None),
        client.list_contacts(None),
        client.list_business_enquiries(None),
    )?;

    let stats = match client.sales_stats(&SaleQuery::default()).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!(error = %e, "Sales stats unavailable, showing zeros");
            SalesStats::default()
        }
    };

    let today = Utc::now().date_naive();

    Ok(DashboardSummary {
        total_products: products.len(),
        total_inquiries: inquiries.len(),
        pending_inquiries: count_pending(inquiries.iter().map(|i| i.status)),
        total_contacts: contacts.len(),
        pending_contacts: count_pending(contacts.iter().map(|c| c.status)),
        total_business_enquiries: enquiries.len(),
        pending_business_enquiries: count_pending(enquiries.iter().map(|e| e.status)),
        total_sales: stats.total_sales,
        current_month_sales: current_month_total(&stats.monthly_sales, today),
        daily_sales: fill_daily(&stats.daily_sales, today),
        monthly_sales: stats.monthly_sales,
    })
}

/// Number of submissions still in their initial status.
pub fn count_pending<S: SubmissionStatus>(statuses: impl IntoIterator<Item = S>) -> usize {
    statuses.into_iter().filter(|s| *s == S::INITIAL).count()
}

/// Completed total for the calendar month containing `today`.
pub fn current_month_total(monthly: &[MonthlyTotal], today: NaiveDate) -> f64 {
    monthly
        .iter()
        .find(|m| m.year == today.year() && m.month == today.month() as i32)
        .map_or(0.0, |m| m.total)
}

/// Expand the sparse daily series into one point per day for the last
/// seven days ending `today`. Days outside that range are dropped.
pub fn fill_daily(daily: &[DailyTotal], today: NaiveDate) -> Vec<DayPoint> {
    (0..DAILY_WINDOW_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let hit = daily.iter().find(|d| {
                d.year == date.year()
                    && d.month == date.month() as i32
                    && d.day == date.day() as i32
            });
            DayPoint {
                date,
                total: hit.map_or(0.0, |d| d.total),
                count: hit.map_or(0, |d| d.count),
            }
        })
        .collect()
}
