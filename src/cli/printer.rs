//! 结果打印器
//!
//! 提供表格、垂直和 JSON 三种输出格式

use crate::algorithm::{INF, INFINITE};
use crate::error::Result;
use prettytable::{format, Cell, Row, Table};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
    /// JSON
    Json,
}

impl Default for PrintMode {
    fn default() -> Self {
        PrintMode::Table
    }
}

/// 结果打印器
#[derive(Debug, Clone)]
pub struct Printer {
    mode: PrintMode,
    precision: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table, 2)
    }
}

impl Printer {
    pub fn new(mode: PrintMode, precision: usize) -> Self {
        Self { mode, precision }
    }

    pub fn mode(&self) -> PrintMode {
        self.mode
    }

    /// 格式化权重，不可达显示为 ∞
    pub fn weight(&self, value: f64) -> String {
        if value == INF || value >= INFINITE {
            "∞".to_string()
        } else {
            format!("{:.*}", self.precision, value)
        }
    }

    /// 格式化路径
    pub fn path<S: AsRef<str>>(labels: &[S]) -> String {
        labels
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(" → ")
    }

    /// 打印结果集
    pub fn print_rows(&self, columns: &[&str], rows: &[Vec<String>]) -> Result<String> {
        if self.mode == PrintMode::Json {
            return self.format_json(columns, rows);
        }
        if columns.is_empty() || rows.is_empty() {
            return Ok("Empty set\n".to_string());
        }

        let output = match self.mode {
            PrintMode::Vertical => self.format_vertical(columns, rows),
            _ => self.format_table(columns, rows),
        };
        Ok(format!("{}\n{} row(s) in set\n", output, rows.len()))
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    fn format_json(&self, columns: &[&str], rows: &[Vec<String>]) -> Result<String> {
        let records: Vec<Value> = rows
            .iter()
            .map(|row_data| {
                let object: Map<String, Value> = columns
                    .iter()
                    .zip(row_data)
                    .map(|(col, value)| (col.to_string(), Value::String(value.clone())))
                    .collect();
                Value::Object(object)
            })
            .collect();
        Ok(format!("{}\n", serde_json::to_string_pretty(&records)?))
    }

    /// 帮助信息
    pub fn help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   RouteGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?                       显示帮助
  quit, exit, q                    退出程序
  stats, info                      显示图统计信息
  vertices, ls                     列出所有顶点
  connected                        检查图是否连通
  clear                            清空当前图

变更:
  add <顶点>                       插入顶点
  remove, rm <顶点>                删除顶点及其关联边
  edge <起点> <终点> [距离 时间]    插入边（已存在时覆盖权重）
  unedge <起点> <终点>             删除边
  update <起点> <终点> <距离> <时间> 更新边权重

查询:
  weight <起点> <终点>             查看边权重
  neighbors, n <顶点>              查看邻居
  degree <顶点>                    查看度（有向图显示出度/入度）

算法:
  path <起点> <终点>               Dijkstra 最短路径
  from <起点>                      Dijkstra 单源报告
  floyd                            Floyd-Warshall 距离矩阵
  floyd-path <起点> <终点>         Floyd-Warshall 路径

提示: 含空格的顶点名用双引号括起，例如 add "La Paz"
═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}
