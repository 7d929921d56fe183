//! Integration tests for `SqliteStore` against an in-memory database.

use nuts_core::{
  nuts::NutsFields,
  store::{NutsQuery, NutsStore},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn fields(level: u8, code: &str, country_id: Uuid, parent_id: Option<Uuid>) -> NutsFields {
  NutsFields {
    level,
    code: code.into(),
    name: format!("{code} region"),
    country_id: Some(country_id),
    parent_id,
  }
}

// ─── Countries ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_find_country() {
  let s = store().await;

  let fr = s.add_country("FR", "France").await.unwrap();
  let found = s.find_country_by_code("FR").await.unwrap().unwrap();
  assert_eq!(found, fr);

  assert!(s.find_country_by_code("fr").await.unwrap().is_none());
  assert!(s.find_country_by_code("XX").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_country_code_errors() {
  let s = store().await;
  s.add_country("DE", "Germany").await.unwrap();
  let err = s.add_country("DE", "Deutschland").await.unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));
}

#[tokio::test]
async fn list_countries_ordered_by_code() {
  let s = store().await;
  s.add_country("SE", "Sweden").await.unwrap();
  s.add_country("AT", "Austria").await.unwrap();
  s.add_country("FR", "France").await.unwrap();

  let codes: Vec<String> = s
    .list_countries()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.code)
    .collect();
  assert_eq!(codes, ["AT", "FR", "SE"]);
}

// ─── Create / find / update ──────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_by_level_and_code() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();

  let created = s
    .create_nuts(fields(1, "FR", fr.country_id, None))
    .await
    .unwrap();

  let found = s.find_nuts(1, "FR").await.unwrap().unwrap();
  assert_eq!(found.nuts_id, created.nuts_id);
  assert_eq!(found.country_id, Some(fr.country_id));

  // Same code on another level is a different key.
  assert!(s.find_nuts(2, "FR").await.unwrap().is_none());
}

#[tokio::test]
async fn create_without_country_is_rejected() {
  let s = store().await;
  let mut f = fields(1, "FR", Uuid::new_v4(), None);
  f.country_id = None;

  let err = s.create_nuts(f).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(nuts_core::Error::CountryRequired { level: 1, .. })
  ));
  assert!(s.find_nuts(1, "FR").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_level_and_code_errors() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();

  s.create_nuts(fields(2, "FR1", fr.country_id, None))
    .await
    .unwrap();
  let err = s
    .create_nuts(fields(2, "FR1", fr.country_id, None))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));
}

#[tokio::test]
async fn update_keeps_identity_and_overwrites_fields() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();

  let parent = s
    .create_nuts(fields(1, "FR", fr.country_id, None))
    .await
    .unwrap();
  let child = s
    .create_nuts(fields(2, "FR1", fr.country_id, None))
    .await
    .unwrap();

  let mut new_fields = child.fields();
  new_fields.name = "Île de France".into();
  new_fields.parent_id = Some(parent.nuts_id);

  let updated = s.update_nuts(child.nuts_id, new_fields).await.unwrap();
  assert_eq!(updated.nuts_id, child.nuts_id);
  assert_eq!(updated.created_at, child.created_at);

  let fetched = s.get_nuts(child.nuts_id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Île de France");
  assert_eq!(fetched.parent_id, Some(parent.nuts_id));
}

#[tokio::test]
async fn update_missing_record_errors() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();

  let err = s
    .update_nuts(Uuid::new_v4(), fields(1, "FR", fr.country_id, None))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::NutsNotFound(_)));
}

// ─── Snapshot and delete ─────────────────────────────────────────────────────

#[tokio::test]
async fn ids_in_countries_only_returns_matching_records() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();
  let de = s.add_country("DE", "Germany").await.unwrap();

  let fr1 = s
    .create_nuts(fields(1, "FR", fr.country_id, None))
    .await
    .unwrap();
  let de1 = s
    .create_nuts(fields(1, "DE", de.country_id, None))
    .await
    .unwrap();

  let ids = s.nuts_ids_in_countries(&[fr.country_id]).await.unwrap();
  assert_eq!(ids, vec![fr1.nuts_id]);

  let mut both = s
    .nuts_ids_in_countries(&[fr.country_id, de.country_id])
    .await
    .unwrap();
  both.sort();
  let mut expected = vec![fr1.nuts_id, de1.nuts_id];
  expected.sort();
  assert_eq!(both, expected);

  assert!(s.nuts_ids_in_countries(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_detaches_children() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();

  let parent = s
    .create_nuts(fields(1, "FR", fr.country_id, None))
    .await
    .unwrap();
  let child = s
    .create_nuts(fields(2, "FR1", fr.country_id, Some(parent.nuts_id)))
    .await
    .unwrap();

  let deleted = s.delete_nuts(&[parent.nuts_id]).await.unwrap();
  assert_eq!(deleted, 1);
  assert!(s.get_nuts(parent.nuts_id).await.unwrap().is_none());

  let orphan = s.get_nuts(child.nuts_id).await.unwrap().unwrap();
  assert_eq!(orphan.parent_id, None);
}

#[tokio::test]
async fn delete_ignores_unknown_ids() {
  let s = store().await;
  assert_eq!(s.delete_nuts(&[]).await.unwrap(), 0);
  assert_eq!(s.delete_nuts(&[Uuid::new_v4()]).await.unwrap(), 0);
}

// ─── Unit of work ────────────────────────────────────────────────────────────

#[tokio::test]
async fn rollback_discards_writes() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();
  let root = s
    .create_nuts(fields(1, "FR", fr.country_id, None))
    .await
    .unwrap();

  s.begin().await.unwrap();
  let mut renamed = root.fields();
  renamed.name = "Renamed".into();
  s.update_nuts(root.nuts_id, renamed).await.unwrap();
  s.create_nuts(fields(2, "FR1", fr.country_id, Some(root.nuts_id)))
    .await
    .unwrap();
  s.rollback().await.unwrap();

  assert_eq!(s.get_nuts(root.nuts_id).await.unwrap().unwrap().name, "FR region");
  assert!(s.find_nuts(2, "FR1").await.unwrap().is_none());
}

#[tokio::test]
async fn commit_keeps_writes_including_deletes() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();
  let root = s
    .create_nuts(fields(1, "FR", fr.country_id, None))
    .await
    .unwrap();

  s.begin().await.unwrap();
  s.create_nuts(fields(2, "FR1", fr.country_id, Some(root.nuts_id)))
    .await
    .unwrap();
  assert_eq!(s.delete_nuts(&[root.nuts_id]).await.unwrap(), 1);
  s.commit().await.unwrap();

  assert!(s.get_nuts(root.nuts_id).await.unwrap().is_none());
  let child = s.find_nuts(2, "FR1").await.unwrap().unwrap();
  assert_eq!(child.parent_id, None);
}

#[tokio::test]
async fn delete_inside_rolled_back_unit_is_undone() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();
  let root = s
    .create_nuts(fields(1, "FR", fr.country_id, None))
    .await
    .unwrap();

  s.begin().await.unwrap();
  s.delete_nuts(&[root.nuts_id]).await.unwrap();
  s.rollback().await.unwrap();

  assert!(s.get_nuts(root.nuts_id).await.unwrap().is_some());
}

#[tokio::test]
async fn units_do_not_nest() {
  let s = store().await;
  s.begin().await.unwrap();
  assert!(matches!(s.begin().await.unwrap_err(), crate::Error::Database(_)));
  s.rollback().await.unwrap();

  // Nothing open any more.
  assert!(s.commit().await.is_err());
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_filters_and_orders() {
  let s = store().await;
  let fr = s.add_country("FR", "France").await.unwrap();
  let de = s.add_country("DE", "Germany").await.unwrap();

  let fr_root = s
    .create_nuts(fields(1, "FR", fr.country_id, None))
    .await
    .unwrap();
  s.create_nuts(fields(2, "FR2", fr.country_id, Some(fr_root.nuts_id)))
    .await
    .unwrap();
  s.create_nuts(fields(2, "FR1", fr.country_id, Some(fr_root.nuts_id)))
    .await
    .unwrap();
  s.create_nuts(fields(1, "DE", de.country_id, None))
    .await
    .unwrap();

  let all = s.list_nuts(&NutsQuery::default()).await.unwrap();
  let codes: Vec<&str> = all.iter().map(|r| r.code.as_str()).collect();
  assert_eq!(codes, ["DE", "FR", "FR1", "FR2"]);

  let level2 = s
    .list_nuts(&NutsQuery { level: Some(2), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(level2.len(), 2);

  let children = s
    .list_nuts(&NutsQuery {
      parent_id: Some(fr_root.nuts_id),
      limit: Some(1),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(children.len(), 1);
  assert_eq!(children[0].code, "FR1");

  let german = s
    .list_nuts(&NutsQuery {
      country_id: Some(de.country_id),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(german.len(), 1);
  assert_eq!(german[0].code, "DE");
}
