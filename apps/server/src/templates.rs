//! HTML templates.
//!
//! Plain `format!` templates with a shared layout. Every value that came
//! from the database or a form goes through [`html_escape`].

use axum::http::StatusCode;
use cafe_core::{Category, InventoryItem, MovementRecord, StockDirection, MAX_ADJUSTMENT_QUANTITY};
use chrono::{DateTime, Utc};

use crate::session::SessionUser;

/// Base HTML layout wrapper.
pub fn layout(title: &str, user: Option<&SessionUser>, content: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<nav>
        <a href="/" class="brand">Café Stock</a>
        <a href="/">Inventory</a>
        <a href="/logs">Movement Log</a>
        <span class="user">{name}</span>
        <a href="/logout">Log out</a>
    </nav>"#,
            name = html_escape(&user.name),
        ),
        None => r#"<nav><span class="brand">Café Stock</span></nav>"#.to_string(),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Café Stock</title>
    <style>
        body {{ font-family: system-ui, sans-serif; margin: 0; background: #faf7f2; color: #2b2118; }}
        nav {{ display: flex; gap: 1rem; align-items: center; padding: .75rem 1.5rem; background: #4b3621; }}
        nav a, nav span {{ color: #fff; text-decoration: none; }}
        nav .brand {{ font-weight: bold; margin-right: auto; }}
        main {{ max-width: 960px; margin: 1.5rem auto; padding: 0 1rem; }}
        table {{ width: 100%; border-collapse: collapse; margin-bottom: 1.5rem; }}
        th, td {{ text-align: left; padding: .4rem .6rem; border-bottom: 1px solid #e5ddd0; }}
        td.num {{ text-align: right; font-variant-numeric: tabular-nums; }}
        .in {{ color: #1b7f3b; }}
        .out, .low {{ color: #b3261e; }}
        .error {{ padding: .6rem .8rem; background: #fdecea; border: 1px solid #f5c2c0; margin-bottom: 1rem; }}
        form label {{ display: block; margin: .5rem 0 .2rem; }}
        button {{ margin-top: .75rem; padding: .4rem 1rem; }}
    </style>
</head>
<body>
    {nav}
    <main>
        {content}
    </main>
</body>
</html>"##,
        title = html_escape(title),
        nav = nav,
        content = content,
    )
}

/// Login form, optionally with an error banner and the submitted name.
pub fn login_page(error: Option<&str>, name: &str) -> String {
    let error_html = error
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .unwrap_or_default();

    let content = format!(
        r#"<h1>Sign in</h1>
        {error_html}
        <form method="post" action="/login">
            <label for="name">Name</label>
            <input id="name" name="name" type="text" value="{name}" required autofocus>
            <label for="password">Password</label>
            <input id="password" name="password" type="password" required>
            <button type="submit">Sign in</button>
        </form>"#,
        error_html = error_html,
        name = html_escape(name),
    );

    layout("Sign in", None, &content)
}

/// Dashboard: one table per category.
pub fn dashboard(user: &SessionUser, categories: &[Category], items: &[InventoryItem]) -> String {
    let mut sections = String::new();

    for category in categories {
        let rows: String = items
            .iter()
            .filter(|item| item.category_id == category.id)
            .map(inventory_row)
            .collect();

        let body = if rows.is_empty() {
            r#"<tr><td colspan="3">No products</td></tr>"#.to_string()
        } else {
            rows
        };

        sections.push_str(&format!(
            r#"<section>
            <h2>{name}</h2>
            <table>
                <thead><tr><th>Product</th><th>Stock</th><th></th></tr></thead>
                <tbody>{body}</tbody>
            </table>
        </section>"#,
            name = html_escape(&category.name),
            body = body,
        ));
    }

    let content = format!(
        r#"<h1>Inventory</h1>
        <p>Signed in as {user}</p>
        {sections}"#,
        user = html_escape(&user.name),
        sections = sections,
    );

    layout("Inventory", Some(user), &content)
}

fn inventory_row(item: &InventoryItem) -> String {
    format!(
        r#"<tr>
                    <td><a href="/product/{id}">{name}</a></td>
                    <td class="num{low}">{stock}</td>
                    <td><a href="/add_stock/{id}">Stock In</a> · <a href="/remove_stock/{id}">Stock Out</a></td>
                </tr>"#,
        id = item.id,
        name = html_escape(&item.name),
        low = if item.is_out_of_stock() { " low" } else { "" },
        stock = item.stock_quantity,
    )
}

/// Product detail with its movement history.
pub fn product_detail(user: &SessionUser, item: &InventoryItem, log: &[MovementRecord]) -> String {
    let rows: String = log
        .iter()
        .map(|record| {
            format!(
                r#"<tr><td>{at}</td><td class="num {class}">{qty}</td><td>{user}</td></tr>"#,
                at = format_timestamp(&record.occurred_at),
                class = direction_class(record.direction()),
                qty = signed_quantity(record.quantity),
                user = html_escape(&record.user_name),
            )
        })
        .collect();

    let history = if rows.is_empty() {
        "<p>No movements recorded yet.</p>".to_string()
    } else {
        format!(
            r#"<table>
            <thead><tr><th>When</th><th>Quantity</th><th>By</th></tr></thead>
            <tbody>{rows}</tbody>
        </table>"#
        )
    };

    let content = format!(
        r#"<h1>{name}</h1>
        <p>Category: {category}</p>
        <p>In stock: <strong class="{low}">{stock}</strong></p>
        <p><a href="/add_stock/{id}">Stock In</a> · <a href="/remove_stock/{id}">Stock Out</a></p>
        <h2>History</h2>
        {history}"#,
        name = html_escape(&item.name),
        category = html_escape(&item.category_name),
        low = if item.is_out_of_stock() { "low" } else { "" },
        stock = item.stock_quantity,
        id = item.id,
        history = history,
    );

    layout(&item.name, Some(user), &content)
}

/// Stock In / Stock Out form.
pub fn stock_form(
    user: &SessionUser,
    item: &InventoryItem,
    direction: StockDirection,
    error: Option<&str>,
    quantity: &str,
) -> String {
    let action = match direction {
        StockDirection::In => "add_stock",
        StockDirection::Out => "remove_stock",
    };

    let error_html = error
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .unwrap_or_default();

    let content = format!(
        r#"<h1>{label}: {name}</h1>
        <p>Current stock: {stock}</p>
        {error_html}
        <form method="post" action="/{action}/{id}">
            <label for="quantity">Quantity</label>
            <input id="quantity" name="quantity" type="number" min="1" max="{max}" value="{quantity}" required autofocus>
            <button type="submit">{label}</button>
        </form>
        <p><a href="/product/{id}">Back to product</a></p>"#,
        label = direction.label(),
        name = html_escape(&item.name),
        stock = item.stock_quantity,
        error_html = error_html,
        action = action,
        id = item.id,
        max = MAX_ADJUSTMENT_QUANTITY,
        quantity = html_escape(quantity),
    );

    layout(direction.label(), Some(user), &content)
}

/// Full movement log.
pub fn movement_log(user: &SessionUser, records: &[MovementRecord]) -> String {
    let rows: String = records
        .iter()
        .map(|record| {
            format!(
                r#"<tr>
                <td>{at}</td>
                <td><a href="/product/{product_id}">{product}</a></td>
                <td>{category}</td>
                <td class="num {class}">{qty}</td>
                <td>{user}</td>
            </tr>"#,
                at = format_timestamp(&record.occurred_at),
                product_id = record.product_id,
                product = html_escape(&record.product_name),
                category = html_escape(&record.category_name),
                class = direction_class(record.direction()),
                qty = signed_quantity(record.quantity),
                user = html_escape(&record.user_name),
            )
        })
        .collect();

    let content = format!(
        r#"<h1>Movement Log</h1>
        <table>
            <thead><tr><th>When</th><th>Product</th><th>Category</th><th>Quantity</th><th>By</th></tr></thead>
            <tbody>{rows}</tbody>
        </table>"#
    );

    layout("Movement Log", Some(user), &content)
}

/// Generic error page.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        r#"<h1>{code} {reason}</h1>
        <p>{message}</p>
        <p><a href="/">Back to inventory</a></p>"#,
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = html_escape(message),
    );

    layout("Error", None, &content)
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn signed_quantity(quantity: i64) -> String {
    format!("{:+}", quantity)
}

fn direction_class(direction: StockDirection) -> &'static str {
    match direction {
        StockDirection::In => "in",
        StockDirection::Out => "out",
    }
}

/// Escapes text for HTML element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barista() -> SessionUser {
        SessionUser {
            user_id: 1,
            name: "barista".to_string(),
        }
    }

    fn coffee(stock: i64) -> InventoryItem {
        InventoryItem {
            id: 7,
            name: "Coffee Beans".to_string(),
            category_id: 1,
            category_name: "Beans".to_string(),
            stock_quantity: stock,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_dashboard_groups_by_category() {
        let categories = vec![
            Category {
                id: 1,
                name: "Beans".to_string(),
            },
            Category {
                id: 2,
                name: "Milk".to_string(),
            },
        ];
        let html = dashboard(&barista(), &categories, &[coffee(12)]);

        assert!(html.contains("<h2>Beans</h2>"));
        assert!(html.contains(r#"<a href="/product/7">Coffee Beans</a>"#));
        assert!(html.contains("No products"));
        assert!(html.contains("Signed in as barista"));
    }

    #[test]
    fn test_names_are_escaped() {
        let mut item = coffee(1);
        item.name = "<script>alert(1)</script>".to_string();
        let html = product_detail(&barista(), &item, &[]);

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_stock_form_targets_direction() {
        let html = stock_form(&barista(), &coffee(3), StockDirection::Out, Some("quantity must be positive"), "-1");

        assert!(html.contains(r#"action="/remove_stock/7""#));
        assert!(html.contains("Stock Out: Coffee Beans"));
        assert!(html.contains("quantity must be positive"));
        assert!(html.contains(r#"value="-1""#));
    }

    #[test]
    fn test_signed_quantity() {
        assert_eq!(signed_quantity(5), "+5");
        assert_eq!(signed_quantity(-3), "-3");
    }

    #[test]
    fn test_error_page() {
        let html = error_page(StatusCode::NOT_FOUND, "Product not found: 9");
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("Product not found: 9"));
    }
}
