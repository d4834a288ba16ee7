use chrono::NaiveDate;
use sample_ddl::{
    ColumnSpec, SampleValue, SqlType, build, infer_sql_type,
    schema::{BuildOptions, DuplicatePolicy, QualifiedName, SchemaBuilder},
};

fn text(value: &str) -> SampleValue {
    SampleValue::Text(value.to_string())
}

#[test]
fn explicit_int_hint_and_date_name_order() {
    assert_eq!(infer_sql_type(&text("INT"), "so_tien"), SqlType::Integer);
    assert_eq!(infer_sql_type(&text("INT"), "ngay_giao_dich"), SqlType::Date);
}

#[test]
fn date_literals_win_for_any_label() {
    assert_eq!(
        infer_sql_type(&text("01/01/2025"), "ngay_giao_dich"),
        SqlType::Date
    );
    assert_eq!(infer_sql_type(&text("01/01/2025"), "so_tien"), SqlType::Date);
}

#[test]
fn numeric_missing_and_free_text() {
    assert_eq!(infer_sql_type(&text("8.5"), "diem"), SqlType::DoublePrecision);
    assert_eq!(
        infer_sql_type(&SampleValue::Missing, "bat_ky_cot"),
        SqlType::Text
    );
    assert_eq!(infer_sql_type(&text("hello world"), "ten"), SqlType::Text);
}

#[test]
fn native_values_are_classified() {
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
    assert_eq!(infer_sql_type(&SampleValue::Date(day), "han"), SqlType::Date);
    assert_eq!(
        infer_sql_type(&SampleValue::Integer(1), "so"),
        SqlType::DoublePrecision
    );
}

#[test]
fn end_to_end_student_table() {
    let columns = vec![
        ColumnSpec::new("Họ và tên", "Nguyễn Văn A"),
        ColumnSpec::new("Ngày sinh", "01/01/2000"),
        ColumnSpec::new("Điểm trung bình", "8.5"),
    ];
    let expected = "\
CREATE TABLE public.hoc_sinh (
    id SERIAL PRIMARY KEY,
    ho_va_ten TEXT,
    ngay_sinh DATE,
    diem_trung_binh DOUBLE PRECISION
);";
    assert_eq!(build("hoc_sinh", &columns), expected);
}

#[test]
fn schema_prefix_is_normalized_separately() {
    let columns = vec![ColumnSpec::new("Số lượng", "INT")];
    let sql = build("Kế Toán.Phiếu Thu", &columns);
    assert!(sql.starts_with("CREATE TABLE ke_toan.phieu_thu (\n"));
    assert!(sql.contains("    so_luong INTEGER\n);"));
}

#[test]
fn builder_matches_free_function_by_default() {
    let columns = vec![
        ColumnSpec::new("Ngân hàng", "ACB"),
        ColumnSpec::new("Ngày giao dịch", "01/01/2025"),
        ColumnSpec::new("Số tiền", "1000"),
    ];
    let table = QualifiedName::new(Some("public"), Some("giao_dich"));
    let via_builder = SchemaBuilder::default()
        .build(&table, &columns)
        .expect("default builder never rejects");
    assert_eq!(via_builder, build("public.giao_dich", &columns));
}

#[test]
fn rejecting_duplicates_names_both_labels() {
    let builder = SchemaBuilder::new(BuildOptions {
        duplicates: DuplicatePolicy::Reject,
        ..BuildOptions::default()
    });
    let err = builder
        .build(
            &QualifiedName::new(None, None),
            &[
                ColumnSpec::new("Số tiền", "1"),
                ColumnSpec::new("so tien", "2"),
            ],
        )
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Số tiền"));
    assert!(message.contains("so tien"));
    assert!(message.contains("so_tien"));
}

#[test]
fn inference_is_deterministic() {
    let columns = vec![
        ColumnSpec::new("Ghi chú", SampleValue::Missing),
        ColumnSpec::new("Tỷ lệ %", 0.5),
    ];
    assert_eq!(build("t", &columns), build("t", &columns));
}
