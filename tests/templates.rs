use tera::{Context, Tera};

fn templates() -> Tera {
    let mut tera = Tera::new("templates/**/*").unwrap();
    tera.add_raw_template(
        "search_form.html",
        r#"{% import "macros.html" as macros %}{{ macros::search(action="/majors", search_query=q, per_page=per_page) }}"#,
    )
    .unwrap();
    tera
}

#[test]
fn search_form_carries_page_size() {
    let mut context = Context::new();
    context.insert("q", "cntt");
    context.insert("per_page", &50);

    let html = templates().render("search_form.html", &context).unwrap();

    assert!(html.contains(r#"name="per_page" value="50""#));
    assert!(html.contains(r#"name="q" value="cntt""#));
}
