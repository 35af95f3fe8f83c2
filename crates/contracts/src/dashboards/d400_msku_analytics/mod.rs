pub mod response;

pub use response::{AggregateBucket, AnalyticsSummary, MskuAnalytics, MskuAnalyticsRequest};
