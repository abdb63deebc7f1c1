//! Pages through a mutating collection, printing every pager
//! notification as it fires.
//!
//! Run with `RUST_LOG=folio=trace` to see the invalidation decisions.

use folio::PagedVec;

fn main() -> folio::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let paged = PagedVec::from_items(4, (1..=10).collect())?;
    let pager = paged.pager();

    pager.signals().page_count_changed.connect(|count| {
        println!("page count -> {count}");
    });
    pager.signals().current_page_changed.connect(|page| {
        println!("current page -> {page}");
    });
    pager.signals().page_view_changed.connect(|view: &Vec<i32>| {
        println!("view -> {view:?}");
    });

    println!("== initial: {:?}", pager.page_view());

    println!("== walk the pages");
    for page in 2..=pager.page_count() {
        pager.change_page(page)?;
    }

    println!("== insert before the current page");
    paged.collection().insert(0, 0);

    println!("== remove after the current page: count only");
    pager.change_page(1)?;
    paged.collection().pop();

    println!("== shrink below the current page count");
    pager.change_page(pager.page_count())?;
    paged.collection().set_items(vec![1, 2]);

    println!("== final: page {} of {}", pager.current_page(), pager.page_count());
    Ok(())
}
