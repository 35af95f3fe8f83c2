//! Общие типы backend и клиентов: записи склада, строки CSV, таблица
//! сопоставления SKU, результаты аналитики и AI-запросов.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod usecases;
