//! Excel出力の統合テスト
//!
//! 生成したブックをcalamineで読み戻して中身を確認する

use calamine::{open_workbook, Reader, Xlsx};
use paycheck::export::excel;
use paycheck_common::export::excel_core::{DETAIL_SHEET, RESULT_SHEET};
use paycheck_common::{CheckEvent, CheckSession, ItemKey, LineItem, SettleType, SettlementResponse};
use std::path::Path;
use tempfile::tempdir;

fn item(id: i64, receipt: i64, store: &str, name: &str, quantity: i64, amount: i64) -> LineItem {
    LineItem {
        id,
        store_name: store.to_string(),
        item_name: name.to_string(),
        quantity,
        unit_price: amount / quantity.max(1),
        total_amount: amount,
        receipt,
    }
}

/// 品目別で「삼겹김치철판」を모수진に割り当て、結果まで反映したセッション
fn settled_session() -> CheckSession {
    let mut session = CheckSession::new(SettleType::Item);
    session.dispatch(CheckEvent::Loaded {
        items: vec![
            item(1, 1, "동국대학교생활협동조합", "삼겹김치철판", 2, 13000),
            item(2, 1, "동국대학교생활협동조합", "콜라", 1, 2000),
            item(3, 2, "카페", "아메리카노", 2, 9000),
        ],
        members: vec!["하승연".to_string(), "모수진".to_string()],
    });

    let pending = session
        .dispatch(CheckEvent::AddParticipant {
            key: ItemKey::new(1, 0),
            name: "모수진".to_string(),
        })
        .expect("割り当て後はリクエストが出るはず");

    let mut response = SettlementResponse { success: true, ..Default::default() };
    response.result.insert("모수진".to_string(), 13000);
    response.result.insert("하승연".to_string(), 0);
    session.complete(pending.ticket, Ok(response));

    session
}

fn cell(range: &calamine::Range<calamine::Data>, row: u32, col: u32) -> String {
    range
        .get_value((row, col))
        .map(|v| v.to_string())
        .unwrap_or_default()
}

fn read_sheets(path: &Path) -> (calamine::Range<calamine::Data>, calamine::Range<calamine::Data>) {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("ブックを開けない");
    let detail = workbook.worksheet_range(DETAIL_SHEET).expect("결제내역シートがない");
    let result = workbook.worksheet_range(RESULT_SHEET).expect("정산 결과シートがない");
    (detail, result)
}

#[test]
fn test_excel_generation_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("정산결과.xlsx");

    let session = settled_session();
    let result = excel::generate_excel(&session, &output_path);
    assert!(result.is_ok(), "Excel生成に失敗: {:?}", result.err());
    assert!(output_path.exists(), "Excelファイルが作成されていない");

    let (detail, settlement) = read_sheets(&output_path);

    // 1枚目のレシート
    assert_eq!(cell(&detail, 0, 0), "동국대학교생활협동조합");
    assert_eq!(cell(&detail, 1, 0), "품목");
    assert_eq!(cell(&detail, 1, 3), "참여자");
    assert_eq!(cell(&detail, 2, 0), "삼겹김치철판");
    assert_eq!(cell(&detail, 2, 1), "2");
    assert_eq!(cell(&detail, 2, 2), "13000");
    assert_eq!(cell(&detail, 2, 3), "모수진");
    // 未割り当ての品目は参加者が空
    assert_eq!(cell(&detail, 3, 0), "콜라");
    assert_eq!(cell(&detail, 3, 3), "");
    assert_eq!(cell(&detail, 4, 0), "총액");
    assert_eq!(cell(&detail, 4, 2), "15000");

    // 2枚目のレシートは1行空けて続く
    assert_eq!(cell(&detail, 6, 0), "카페");
    assert_eq!(cell(&detail, 8, 0), "아메리카노");

    // 정산 결과（名前順）
    assert_eq!(cell(&settlement, 0, 0), "참여자");
    assert_eq!(cell(&settlement, 1, 0), "모수진");
    assert_eq!(cell(&settlement, 1, 1), "13000");
    assert_eq!(cell(&settlement, 2, 0), "하승연");
    assert_eq!(cell(&settlement, 2, 1), "0");
    assert_eq!(cell(&settlement, 3, 0), "총액");
    assert_eq!(cell(&settlement, 3, 1), "24000");
}

/// 1/N精算では全員が各品目の参加者として出力される
#[test]
fn test_excel_even_lists_whole_roster() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("even.xlsx");

    let mut session = settled_session();
    session.dispatch(CheckEvent::SetSettleType(SettleType::Even));

    excel::generate_excel(&session, &output_path).expect("Excel生成に失敗");

    let (detail, _) = read_sheets(&output_path);
    assert_eq!(cell(&detail, 2, 3), "하승연, 모수진");
    assert_eq!(cell(&detail, 3, 3), "하승연, 모수진");
}

#[test]
fn test_excel_generation_empty_session() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("empty.xlsx");

    let session = CheckSession::new(SettleType::Even);
    let result = excel::generate_excel(&session, &output_path);
    assert!(result.is_ok(), "空でもExcelは生成できるはず: {:?}", result.err());

    let (_, settlement) = read_sheets(&output_path);
    assert_eq!(cell(&settlement, 1, 0), "총액");
    assert_eq!(cell(&settlement, 1, 1), "0");
}

/// 存在しないディレクトリにも出力できる
#[test]
fn test_excel_creates_parent_dirs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("nested").join("deep").join("out.xlsx");

    excel::generate_excel(&settled_session(), &output_path).expect("Excel生成に失敗");
    assert!(output_path.exists());
}
