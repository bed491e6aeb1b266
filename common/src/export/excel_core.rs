//! 精算結果のExcel生成（共通ライブラリ）
//!
//! シート構成:
//! - 결제내역: レシートごとの品目・数量・金額・参加者と合計
//! - 정산 결과: 参加者ごとの負担額と総額

use crate::assignment::ItemKey;
use crate::error::{Error, Result};
use crate::grouping::grand_total;
use crate::session::CheckSession;
use rust_xlsxwriter::*;

pub const DETAIL_SHEET: &str = "결제내역";
pub const RESULT_SHEET: &str = "정산 결과";

const DETAIL_HEADERS: [&str; 4] = ["품목", "수량", "금액", "참여자"];

fn xlsx_error(context: &str) -> impl Fn(XlsxError) -> Error + '_ {
    move |e| Error::Export(format!("{}: {}", context, e))
}

/// 精算結果をExcelバッファに生成
pub fn generate_settlement_buffer(session: &CheckSession) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let store_format = Format::new()
        .set_bold()
        .set_font_size(13.0)
        .set_font_color(Color::RGB(0x51BE5A));

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x525761))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let amount_format = Format::new().set_num_format("#,##0");

    let total_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x0083FF))
        .set_num_format("#,##0");

    // 결제내역
    let detail = workbook.add_worksheet();
    detail.set_name(DETAIL_SHEET).map_err(xlsx_error("シート名設定エラー"))?;
    detail.set_column_width(0, 24).map_err(xlsx_error("列幅設定エラー"))?;
    detail.set_column_width(1, 8).map_err(xlsx_error("列幅設定エラー"))?;
    detail.set_column_width(2, 12).map_err(xlsx_error("列幅設定エラー"))?;
    detail.set_column_width(3, 30).map_err(xlsx_error("列幅設定エラー"))?;

    let mut row: u32 = 0;
    for group in session.groups() {
        detail
            .write_string_with_format(row, 0, group.store_name(), &store_format)
            .map_err(xlsx_error("店名書き込みエラー"))?;
        row += 1;

        for (col, header) in DETAIL_HEADERS.iter().enumerate() {
            detail
                .write_string_with_format(row, col as u16, *header, &header_format)
                .map_err(xlsx_error("ヘッダー書き込みエラー"))?;
        }
        row += 1;

        for (index, item) in group.items.iter().enumerate() {
            let participants = session.display_participants(ItemKey::new(group.receipt, index));
            detail
                .write_string(row, 0, &item.item_name)
                .map_err(xlsx_error("品目書き込みエラー"))?;
            detail
                .write_number(row, 1, item.quantity as f64)
                .map_err(xlsx_error("数量書き込みエラー"))?;
            detail
                .write_number_with_format(row, 2, item.total_amount as f64, &amount_format)
                .map_err(xlsx_error("金額書き込みエラー"))?;
            detail
                .write_string(row, 3, participants.join(", "))
                .map_err(xlsx_error("参加者書き込みエラー"))?;
            row += 1;
        }

        detail
            .write_string_with_format(row, 0, "총액", &total_format)
            .map_err(xlsx_error("合計書き込みエラー"))?;
        detail
            .write_number_with_format(row, 2, group.total() as f64, &total_format)
            .map_err(xlsx_error("合計書き込みエラー"))?;
        row += 2;
    }

    // 정산 결과
    let result_sheet = workbook.add_worksheet();
    result_sheet.set_name(RESULT_SHEET).map_err(xlsx_error("シート名設定エラー"))?;
    result_sheet.set_column_width(0, 16).map_err(xlsx_error("列幅設定エラー"))?;
    result_sheet.set_column_width(1, 14).map_err(xlsx_error("列幅設定エラー"))?;

    result_sheet
        .write_string_with_format(0, 0, "참여자", &header_format)
        .map_err(xlsx_error("ヘッダー書き込みエラー"))?;
    result_sheet
        .write_string_with_format(0, 1, "금액", &header_format)
        .map_err(xlsx_error("ヘッダー書き込みエラー"))?;

    let mut row: u32 = 1;
    if let Some(result) = session.result() {
        for (name, amount) in result {
            result_sheet
                .write_string(row, 0, name)
                .map_err(xlsx_error("参加者書き込みエラー"))?;
            result_sheet
                .write_number_with_format(row, 1, *amount as f64, &amount_format)
                .map_err(xlsx_error("金額書き込みエラー"))?;
            row += 1;
        }
    }

    result_sheet
        .write_string_with_format(row, 0, "총액", &total_format)
        .map_err(xlsx_error("合計書き込みエラー"))?;
    result_sheet
        .write_number_with_format(row, 1, grand_total(session.groups()) as f64, &total_format)
        .map_err(xlsx_error("合計書き込みエラー"))?;

    workbook.save_to_buffer().map_err(xlsx_error("Excel保存エラー"))
}
