//! Form model construction tests
//!
//! Builds models from introspected tables and checks widget resolution, field
//! selection and required-ness.

use rstest::{fixture, rstest};
use schemaform_db::{ColumnMetadata, DatabaseError, InMemoryDatabase, KeyRole};
use schemaform_forms::{FormError, FormModel, FormOptions, WidgetKind};

#[fixture]
fn users_db() -> InMemoryDatabase {
	InMemoryDatabase::new().with_table(
		"users",
		vec![
			ColumnMetadata::auto_increment_key("id", "int(11) unsigned"),
			ColumnMetadata::new("name", "varchar(100)"),
			ColumnMetadata::new("email", "varchar(255)").with_key_role(KeyRole::Unique),
			ColumnMetadata::new("user_password", "varchar(255)"),
			ColumnMetadata::new("role", "enum('admin','editor','viewer')").with_default("viewer"),
			ColumnMetadata::new("active", "enum('yes','no')"),
			ColumnMetadata::new("newsletter", "tinyint(1)").with_nullable(true),
			ColumnMetadata::new("bio", "text").with_nullable(true),
			ColumnMetadata::new("born_on", "date").with_nullable(true),
			ColumnMetadata::new("skills", "json").with_nullable(true),
		],
	)
}

#[rstest]
#[tokio::test]
async fn test_introspected_widgets(users_db: InMemoryDatabase) {
	let model = FormModel::introspect(&users_db, "users", &FormOptions::default())
		.await
		.unwrap();

	let widgets: Vec<(&str, WidgetKind)> = model
		.fields()
		.iter()
		.map(|f| (f.name(), f.widget()))
		.collect();
	assert_eq!(
		widgets,
		[
			("name", WidgetKind::Text),
			("email", WidgetKind::Text),
			("user_password", WidgetKind::Password),
			("role", WidgetKind::Dropdown),
			("active", WidgetKind::Radio),
			("newsletter", WidgetKind::Radio),
			("bio", WidgetKind::TextArea),
			("born_on", WidgetKind::Date),
			("skills", WidgetKind::Text),
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_auto_increment_never_a_field(users_db: InMemoryDatabase) {
	let model = FormModel::introspect(&users_db, "users", &FormOptions::default())
		.await
		.unwrap();

	assert!(model.field("id").is_none());
	assert!(!model.build_insert_statement().columns().contains(&"id".to_string()));
}

#[rstest]
#[tokio::test]
async fn test_required_follows_nullability(users_db: InMemoryDatabase) {
	let model = FormModel::introspect(&users_db, "users", &FormOptions::default())
		.await
		.unwrap();

	for field in model.fields() {
		let expected = matches!(
			field.name(),
			"name" | "email" | "user_password" | "role" | "active"
		);
		assert_eq!(field.required(), expected, "field {}", field.name());
	}
}

#[rstest]
#[tokio::test]
async fn test_relaxed_key_columns(users_db: InMemoryDatabase) {
	let options = FormOptions::default().with_relax_key_columns(true);
	let model = FormModel::introspect(&users_db, "users", &options).await.unwrap();

	assert!(!model.field("email").unwrap().required());
	assert!(model.field("name").unwrap().required());
}

#[rstest]
#[tokio::test]
async fn test_option_lists(users_db: InMemoryDatabase) {
	let model = FormModel::introspect(&users_db, "users", &FormOptions::default())
		.await
		.unwrap();

	assert_eq!(model.field("role").unwrap().options(), ["admin", "editor", "viewer"]);
	assert_eq!(model.field("active").unwrap().options(), ["yes", "no"]);
	assert_eq!(model.field("newsletter").unwrap().options(), ["0", "1"]);
}

#[rstest]
#[tokio::test]
async fn test_json_field_flags(users_db: InMemoryDatabase) {
	let model = FormModel::introspect(&users_db, "users", &FormOptions::default())
		.await
		.unwrap();
	let skills = model.field("skills").unwrap();

	assert!(skills.is_json_encoded());
	assert!(skills.accepts_multiple());
	assert!(skills.placeholder().starts_with("Skills: "));
}

#[rstest]
#[tokio::test]
async fn test_unknown_table_fails_introspection(users_db: InMemoryDatabase) {
	let result = FormModel::introspect(&users_db, "ghosts", &FormOptions::default()).await;

	match result {
		Err(FormError::SchemaIntrospectionFailed { table, reason }) => {
			assert_eq!(table, "ghosts");
			assert_eq!(reason, DatabaseError::UnknownTable("ghosts".to_string()).to_string());
		}
		other => panic!("unexpected result: {:?}", other),
	}
}

#[rstest]
#[tokio::test]
async fn test_unsupported_column_aborts_build() {
	let db = InMemoryDatabase::new().with_table(
		"places",
		vec![
			ColumnMetadata::new("name", "varchar(50)"),
			ColumnMetadata::new("location", "geometry"),
		],
	);

	let result = FormModel::introspect(&db, "places", &FormOptions::default()).await;
	assert!(matches!(
		result,
		Err(FormError::UnsupportedColumnType { column, raw_type })
			if column == "location" && raw_type == "geometry"
	));
}

#[rstest]
#[case::only_name(&["name"], &["name"])]
#[case::order_kept(&["email", "name"], &["name", "email"])]
fn test_restrict_to(#[case] wanted: &[&str], #[case] expected: &[&str]) {
	let columns = vec![
		ColumnMetadata::auto_increment_key("id", "int"),
		ColumnMetadata::new("name", "varchar(100)"),
		ColumnMetadata::new("email", "varchar(255)"),
	];
	let model = FormModel::build("people", &columns, &FormOptions::default())
		.unwrap()
		.restrict_to(wanted.iter().copied())
		.unwrap();

	assert_eq!(model.field_names(), expected);
}

#[test]
fn test_restrict_to_bogus_fails() {
	let columns = vec![
		ColumnMetadata::new("name", "varchar(100)"),
		ColumnMetadata::new("email", "varchar(255)"),
	];
	let result = FormModel::build("people", &columns, &FormOptions::default())
		.unwrap()
		.restrict_to(["bogus"]);

	assert!(matches!(
		result,
		Err(FormError::InvalidFieldSelection { missing }) if missing == ["bogus"]
	));
}

#[test]
fn test_omit_bogus_is_noop() {
	let columns = vec![
		ColumnMetadata::new("name", "varchar(100)"),
		ColumnMetadata::new("email", "varchar(255)"),
	];
	let model = FormModel::build("people", &columns, &FormOptions::default()).unwrap();
	let before = model.field_names().iter().map(|s| s.to_string()).collect::<Vec<_>>();

	let model = model.omit(["bogus"]).omit(["bogus"]);
	assert_eq!(model.field_names(), before);
}

#[test]
fn test_insert_statement_sql() {
	let columns = vec![
		ColumnMetadata::auto_increment_key("id", "int"),
		ColumnMetadata::new("title", "varchar(100)"),
		ColumnMetadata::new("body", "text"),
	];
	let model = FormModel::build("articles", &columns, &FormOptions::default()).unwrap();

	assert_eq!(
		model.build_insert_statement().to_sql(),
		"INSERT INTO `articles` (`title`, `body`) VALUES (:title, :body)"
	);
}
