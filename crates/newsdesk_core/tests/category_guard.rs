mod common;

use common::{article_in, category, FlakyStore};
use newsdesk_core::{
    ArticleListQuery, ArticleStatus, CategoryServiceError, ContentCore, CoreConfig, Language,
    CategoryPatch, NewArticle, NewCategory, RepoError, StoreError, ValidationError,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn core(store: &Arc<FlakyStore>) -> ContentCore {
    ContentCore::new(store.clone(), &CoreConfig::default())
}

#[tokio::test]
async fn guard_never_removes_a_referenced_category() {
    let store = FlakyStore::new();
    let core = core(&store);

    let id = core
        .categories
        .create_category(&category("Sports"))
        .await
        .unwrap();
    core.articles
        .create_article(&article_in("Sports", "a"))
        .await
        .unwrap();

    let err = core.categories.delete_category(&id).await.unwrap_err();
    assert!(matches!(
        err,
        CategoryServiceError::HasArticles { ref name, count: 1 } if name == "Sports"
    ));
    assert!(store.removed().is_empty());
    assert_eq!(core.categories.repository().list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn guard_counts_on_the_stored_name() {
    let store = FlakyStore::new();
    let core = core(&store);

    let sports = core
        .categories
        .create_category(&category("Sports"))
        .await
        .unwrap();
    core.categories
        .create_category(&category("Empty"))
        .await
        .unwrap();
    core.articles
        .create_article(&article_in("Sports", "a"))
        .await
        .unwrap();

    let err = core.categories.delete_category(&sports).await.unwrap_err();
    assert!(matches!(
        err,
        CategoryServiceError::HasArticles { ref name, count: 1 } if name == "Sports"
    ));
    assert_eq!(store.count_calls.load(Ordering::SeqCst), 1);
    assert!(store.removed().is_empty());
    assert_eq!(core.categories.repository().list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn guard_follows_a_renamed_category() {
    let store = FlakyStore::new();
    let core = core(&store);

    let id = core
        .categories
        .create_category(&category("Sport"))
        .await
        .unwrap();
    core.articles
        .create_article(&article_in("Sports", "a"))
        .await
        .unwrap();
    core.categories
        .update_category(
            &id,
            &CategoryPatch {
                name: Some("Sports".to_string()),
                ..CategoryPatch::default()
            },
        )
        .await
        .unwrap();

    let err = core.categories.delete_category(&id).await.unwrap_err();
    assert!(matches!(err, CategoryServiceError::HasArticles { count: 1, .. }));
    assert!(store.removed().is_empty());
}

#[tokio::test]
async fn guard_rejects_unknown_category_without_removing() {
    let store = FlakyStore::new();
    let core = core(&store);

    let err = core.categories.delete_category("missing").await.unwrap_err();
    assert!(matches!(
        err,
        CategoryServiceError::Repo(RepoError::Write(StoreError::NotFound { ref id, .. }))
            if id == "missing"
    ));
    assert_eq!(store.count_calls.load(Ordering::SeqCst), 0);
    assert!(store.removed().is_empty());
}

#[tokio::test]
async fn guard_fails_closed_when_count_is_unknown() {
    let store = FlakyStore::new();
    let core = core(&store);
    let id = core
        .categories
        .create_category(&category("Empty"))
        .await
        .unwrap();

    store.set_fail_counts(true);
    let err = core.categories.delete_category(&id).await.unwrap_err();
    assert!(matches!(err, CategoryServiceError::Repo(RepoError::Read(_))));
    assert!(store.removed().is_empty());
}

#[tokio::test]
async fn guard_rechecks_on_every_attempt() {
    let store = FlakyStore::new();
    let core = core(&store);
    let id = core
        .categories
        .create_category(&category("Sports"))
        .await
        .unwrap();
    let article = core
        .articles
        .create_article(&article_in("Sports", "a"))
        .await
        .unwrap();

    assert!(core.categories.delete_category(&id).await.is_err());
    core.articles.delete_article(&article).await.unwrap();
    core.categories.delete_category(&id).await.unwrap();

    assert_eq!(store.count_calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        store.removed(),
        vec![
            ("articles".to_string(), article),
            ("categories".to_string(), id)
        ]
    );
}

#[tokio::test]
async fn deletability_follows_article_lifecycle() {
    let store = FlakyStore::new();
    let core = core(&store);
    let repo = core.categories.repository();

    core.categories
        .create_category(&category("Tech"))
        .await
        .unwrap();
    assert_eq!(repo.article_count("Tech").await, 0);
    assert!(repo.can_delete("Tech").await);

    let article = core
        .articles
        .create_article(&article_in("Tech", "gadgets"))
        .await
        .unwrap();
    assert!(!repo.can_delete("Tech").await);

    core.articles.delete_article(&article).await.unwrap();
    assert!(repo.can_delete("Tech").await);
}

#[tokio::test]
async fn moving_the_last_article_makes_category_deletable() {
    let store = FlakyStore::new();
    let core = core(&store);
    let id = core
        .categories
        .create_category(&category("Sports"))
        .await
        .unwrap();
    let article = core
        .articles
        .create_article(&article_in("Sports", "a"))
        .await
        .unwrap();

    core.articles
        .update_article(&article, &newsdesk_core::ArticlePatch::category("Health"))
        .await
        .unwrap();
    core.categories.delete_category(&id).await.unwrap();
    assert!(core.categories.repository().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn services_validate_before_writing() {
    let store = FlakyStore::new();
    let core = core(&store);

    let err = core
        .categories
        .create_category(&NewCategory::new("  ", "खेल"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CategoryServiceError::Validation(ValidationError::BlankName)
    ));

    let err = core
        .articles
        .create_article(&NewArticle::draft("", "body", "Sports", Language::English))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        newsdesk_core::ArticleServiceError::Validation(ValidationError::BlankTitle)
    ));
    assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn authoring_categories_fall_back_to_defaults() {
    let store = FlakyStore::new();
    let core = core(&store);
    core.categories
        .create_category(&category("Local"))
        .await
        .unwrap();
    assert_eq!(core.categories.authoring_categories().await, vec!["Local"]);

    store.set_fail_lists(true);
    let names = core.categories.authoring_categories().await;
    assert_eq!(names.len(), 7);
    assert_eq!(names[0], "Politics");
}

#[tokio::test]
async fn start_seeds_unless_disabled_and_swallows_failures() {
    let store = FlakyStore::new();
    let disabled = CoreConfig {
        seed_on_start: false,
        ..CoreConfig::default()
    };
    let core = ContentCore::new(store.clone(), &disabled);
    assert_eq!(core.start(&disabled).await, 0);
    assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);

    store.set_fail_lists(true);
    assert_eq!(core.start(&CoreConfig::default()).await, 0);
    store.set_fail_lists(false);

    assert_eq!(core.start(&CoreConfig::default()).await, 7);
}

#[tokio::test]
async fn article_listing_filters_and_stats() {
    let store = FlakyStore::new();
    let core = core(&store);

    let published = NewArticle {
        status: ArticleStatus::Published,
        ..NewArticle::draft("P", "body", "Sports", Language::Hindi)
    };
    let hot = core.articles.create_article(&published).await.unwrap();
    core.articles
        .create_article(&article_in("Sports", "draft"))
        .await
        .unwrap();
    core.articles.record_view(&hot).await.unwrap();
    core.articles.record_view(&hot).await.unwrap();

    let hindi = core
        .articles
        .list_articles(&ArticleListQuery {
            language: Some(Language::Hindi),
            ..ArticleListQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(hindi.len(), 1);
    assert_eq!(hindi[0].id, hot);

    let drafts = core
        .articles
        .list_articles(&ArticleListQuery {
            status: Some(ArticleStatus::Draft),
            ..ArticleListQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].language, Language::English);

    let stats = core.articles.stats().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.published, 1);
    assert_eq!(stats.drafts, 1);
    assert_eq!(stats.total_views, 2);

    core.articles
        .set_status(&hot, ArticleStatus::Draft)
        .await
        .unwrap();
    assert_eq!(core.articles.stats().await.unwrap().published, 0);
}

#[tokio::test]
async fn custom_collections_are_respected() {
    let store = FlakyStore::new();
    let config = CoreConfig {
        articles_collection: "news".to_string(),
        categories_collection: "sections".to_string(),
        ..CoreConfig::default()
    };
    let core = ContentCore::new(store.clone(), &config);

    core.categories
        .create_category(&category("Sports"))
        .await
        .unwrap();
    core.articles
        .create_article(&article_in("Sports", "a"))
        .await
        .unwrap();

    assert_eq!(store.inner().len("news"), 1);
    assert_eq!(store.inner().len("sections"), 1);
    assert_eq!(core.categories.repository().article_count("Sports").await, 1);
}
