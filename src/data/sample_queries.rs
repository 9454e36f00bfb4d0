use chrono::{Local, Months};

use crate::domain::entities::dataset::{CellValue, Dataset, Row};
use crate::domain::entities::query::SampleQuery;

/// Canned queries shipped with the app. The mock results are generated
/// deterministically so re-running a query yields the same dataset.
pub fn sample_queries() -> Vec<SampleQuery> {
    vec![
        revenue_analysis(),
        customer_cohorts(),
        product_performance(),
        customer_segmentation(),
    ]
}

fn revenue_analysis() -> SampleQuery {
    let columns = string_vec(&[
        "month",
        "total_orders",
        "revenue",
        "avg_order_value",
        "unique_customers",
    ]);
    let rows: Vec<Row> = (0..12)
        .map(|i| {
            row(&[
                ("month", CellValue::from(month_label(i))),
                ("total_orders", CellValue::from(spread(i as u64, 500, 1500))),
                ("revenue", CellValue::from(spread(100 + i as u64, 100_000, 600_000))),
                ("avg_order_value", CellValue::from(spread(200 + i as u64, 100, 300))),
                ("unique_customers", CellValue::from(spread(300 + i as u64, 200, 700))),
            ])
        })
        .collect();

    SampleQuery {
        name: "Revenue Analysis".to_string(),
        description: "Analyze monthly revenue trends".to_string(),
        query: "SELECT\n  DATE_FORMAT(order_date, '%Y-%m') as month,\n  COUNT(*) as total_orders,\n  SUM(amount) as revenue,\n  AVG(amount) as avg_order_value,\n  COUNT(DISTINCT customer_id) as unique_customers\nFROM\n  orders\nWHERE\n  order_date >= DATE_SUB(CURRENT_DATE, INTERVAL 12 MONTH)\nGROUP BY\n  DATE_FORMAT(order_date, '%Y-%m')\nORDER BY\n  month DESC;".to_string(),
        results: dataset(columns, rows),
    }
}

fn customer_cohorts() -> SampleQuery {
    let columns = string_vec(&[
        "cohort_month",
        "cohort_size",
        "retained_customers",
        "retention_rate",
    ]);
    let rows: Vec<Row> = (0..6)
        .map(|i| {
            let cohort_size = spread(400 + i as u64, 200, 700);
            let retained = cohort_size * spread(500 + i as u64, 50, 90) / 100;
            let rate = retained as f64 / cohort_size as f64 * 100.0;
            row(&[
                ("cohort_month", CellValue::from(month_label(i))),
                ("cohort_size", CellValue::from(cohort_size)),
                ("retained_customers", CellValue::from(retained)),
                // Rendered with two decimals as text, like the report column.
                ("retention_rate", CellValue::from(format!("{rate:.2}"))),
            ])
        })
        .collect();

    SampleQuery {
        name: "Customer Cohort Analysis".to_string(),
        description: "Track customer retention by cohort".to_string(),
        query: "WITH first_purchases AS (\n  SELECT\n    customer_id,\n    DATE_FORMAT(MIN(order_date), '%Y-%m') as cohort_month\n  FROM orders\n  GROUP BY customer_id\n)\nSELECT\n  fp.cohort_month,\n  COUNT(DISTINCT fp.customer_id) as cohort_size,\n  COUNT(DISTINCT o.customer_id) as retained_customers,\n  ROUND(COUNT(DISTINCT o.customer_id) / COUNT(DISTINCT fp.customer_id) * 100, 2) as retention_rate\nFROM\n  first_purchases fp\n  LEFT JOIN orders o ON fp.customer_id = o.customer_id\n  AND DATE_FORMAT(o.order_date, '%Y-%m') = fp.cohort_month\nGROUP BY\n  fp.cohort_month\nORDER BY\n  fp.cohort_month DESC;".to_string(),
        results: dataset(columns, rows),
    }
}

fn product_performance() -> SampleQuery {
    const CATEGORIES: [&str; 4] = ["Electronics", "Clothing", "Home & Garden", "Books"];
    let columns = string_vec(&[
        "product_name",
        "category",
        "total_sales",
        "units_sold",
        "revenue",
        "avg_rating",
        "review_count",
    ]);
    let rows: Vec<Row> = (0..50)
        .map(|i| {
            let rating = 3.0 + (spread(700 + i as u64, 0, 20) as f64) / 10.0;
            row(&[
                ("product_name", CellValue::from(format!("Product {}", i + 1))),
                (
                    "category",
                    CellValue::from(CATEGORIES[(i as usize) % CATEGORIES.len()]),
                ),
                ("total_sales", CellValue::from(spread(710 + i as u64, 200, 1200))),
                ("units_sold", CellValue::from(spread(720 + i as u64, 500, 2500))),
                ("revenue", CellValue::from(spread(730 + i as u64, 10_000, 110_000))),
                ("avg_rating", CellValue::from(format!("{rating:.1}"))),
                ("review_count", CellValue::from(spread(740 + i as u64, 50, 550))),
            ])
        })
        .collect();

    SampleQuery {
        name: "Product Performance".to_string(),
        description: "Analyze top-selling products".to_string(),
        query: "SELECT\n  p.product_name,\n  p.category,\n  COUNT(*) as total_sales,\n  SUM(oi.quantity) as units_sold,\n  SUM(oi.quantity * oi.unit_price) as revenue,\n  AVG(r.rating) as avg_rating,\n  COUNT(r.review_text) as review_count\nFROM\n  products p\n  JOIN order_items oi ON p.product_id = oi.product_id\n  LEFT JOIN reviews r ON p.product_id = r.product_id\nGROUP BY\n  p.product_id, p.product_name, p.category\nHAVING\n  units_sold > 100\nORDER BY\n  revenue DESC\nLIMIT 50;".to_string(),
        results: dataset(columns, rows),
    }
}

fn customer_segmentation() -> SampleQuery {
    let columns = string_vec(&[
        "customer_name",
        "total_orders",
        "total_spent",
        "avg_order_value",
        "days_since_last_order",
        "customer_segment",
    ]);
    let rows: Vec<Row> = (0..100)
        .map(|i| {
            let total_orders = spread(900 + i as u64, 1, 31);
            let avg_order_value = spread(910 + i as u64, 50, 350);
            let total_spent = total_orders * avg_order_value;
            let days_since_last_order = spread(920 + i as u64, 0, 500);
            let segment = if total_spent > 5000 && days_since_last_order < 90 {
                "VIP"
            } else if total_spent > 2000 || (total_orders > 10 && days_since_last_order < 180) {
                "Regular"
            } else if days_since_last_order > 365 {
                "Churned"
            } else {
                "Standard"
            };
            row(&[
                ("customer_name", CellValue::from(format!("Customer {}", i + 1))),
                ("total_orders", CellValue::from(total_orders)),
                ("total_spent", CellValue::from(total_spent)),
                ("avg_order_value", CellValue::from(avg_order_value)),
                ("days_since_last_order", CellValue::from(days_since_last_order)),
                ("customer_segment", CellValue::from(segment)),
            ])
        })
        .collect();

    SampleQuery {
        name: "Customer Segmentation".to_string(),
        description: "Segment customers by purchase behavior".to_string(),
        query: "WITH customer_metrics AS (\n  SELECT\n    c.customer_id,\n    c.customer_name,\n    COUNT(o.order_id) as total_orders,\n    SUM(o.amount) as total_spent,\n    AVG(o.amount) as avg_order_value,\n    DATEDIFF(CURRENT_DATE, MAX(o.order_date)) as days_since_last_order\n  FROM\n    customers c\n    JOIN orders o ON c.customer_id = o.customer_id\n  GROUP BY\n    c.customer_id, c.customer_name\n)\nSELECT\n  customer_name,\n  total_orders,\n  total_spent,\n  avg_order_value,\n  days_since_last_order,\n  CASE\n    WHEN total_spent > 5000 AND days_since_last_order < 90 THEN 'VIP'\n    WHEN total_spent > 2000 OR (total_orders > 10 AND days_since_last_order < 180) THEN 'Regular'\n    WHEN days_since_last_order > 365 THEN 'Churned'\n    ELSE 'Standard'\n  END as customer_segment\nFROM\n  customer_metrics\nORDER BY\n  total_spent DESC;".to_string(),
        results: dataset(columns, rows),
    }
}

fn month_label(months_back: u32) -> String {
    let today = Local::now().date_naive();
    today
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(today)
        .format("%Y-%m")
        .to_string()
}

/// splitmix64 finalizer; good enough spread for mock report figures.
fn mix(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn spread(seed: u64, low: i64, high: i64) -> i64 {
    low + (mix(seed) % (high - low) as u64) as i64
}

fn string_vec(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn row(cells: &[(&str, CellValue)]) -> Row {
    cells
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn dataset(columns: Vec<String>, rows: Vec<Row>) -> Dataset {
    Dataset::new(columns, rows).expect("sample datasets are well-formed")
}
