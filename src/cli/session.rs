//! 控制台会话
//!
//! 持有当前图（有向或无向）以及缓存的 Floyd-Warshall 快照

use super::commands::Command;
use super::printer::{PrintMode, Printer};
use crate::algorithm::AllPairs;
use crate::error::Result;
use crate::graph::{DiWeightedGraph, GraphView, WeightedGraph};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::debug;

/// 会话配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 是否使用有向图
    pub directed: bool,
    /// 输出格式
    pub print_mode: PrintMode,
    /// 权重显示的小数位数
    pub precision: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            directed: false,
            print_mode: PrintMode::Table,
            precision: 2,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn with_print_mode(mut self, mode: PrintMode) -> Self {
        self.print_mode = mode;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.min(10);
        self
    }
}

/// 图引擎：有向或无向
#[derive(Debug, Clone)]
pub enum Engine {
    Undirected(WeightedGraph<String>),
    Directed(DiWeightedGraph<String>),
}

/// 在两种图上执行同一段代码（静态分发）
macro_rules! with_graph {
    ($engine:expr, $g:ident => $body:expr) => {
        match $engine {
            Engine::Undirected($g) => $body,
            Engine::Directed($g) => $body,
        }
    };
}

impl Engine {
    pub fn new(directed: bool) -> Self {
        if directed {
            Engine::Directed(DiWeightedGraph::new())
        } else {
            Engine::Undirected(WeightedGraph::new())
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, Engine::Directed(_))
    }

    pub fn generation(&self) -> u64 {
        with_graph!(self, g => g.generation())
    }

    pub fn insert_vertex(&mut self, label: String) -> bool {
        with_graph!(self, g => g.insert_vertex(label))
    }

    pub fn remove_vertex(&mut self, label: &String) -> Result<()> {
        with_graph!(self, g => g.remove_vertex(label))
    }

    pub fn insert_edge(&mut self, from: &String, to: &String, distance: f64, duration: f64) -> Result<()> {
        with_graph!(self, g => g.insert_edge(from, to, distance, duration))
    }

    pub fn remove_edge(&mut self, from: &String, to: &String) -> Result<()> {
        with_graph!(self, g => g.remove_edge(from, to))
    }

    pub fn update_edge_weight(
        &mut self,
        from: &String,
        to: &String,
        distance: f64,
        duration: f64,
    ) -> Result<()> {
        with_graph!(self, g => g.update_edge_weight(from, to, distance, duration))
    }

    /// 以当前图构建全源最短路径快照
    pub fn build_all_pairs(&self) -> AllPairs<String> {
        with_graph!(self, g => g.build_all_pairs())
    }
}

/// 命令执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// 继续运行，附带输出
    Continue(String),
    /// 退出程序
    Exit,
}

/// 控制台会话
pub struct Session {
    config: SessionConfig,
    engine: Engine,
    printer: Printer,
    all_pairs: Option<AllPairs<String>>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            engine: Engine::new(config.directed),
            printer: Printer::new(config.print_mode, config.precision),
            config,
            all_pairs: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// 解析并执行一行命令
    pub fn execute_line(&mut self, line: &str) -> Result<CommandResult> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    /// 逐行执行命令直到 quit 或输入结束
    ///
    /// 命令出错时把错误写入输出并继续执行下一行，只有读写失败才返回错误。
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
        prompt: Option<&str>,
    ) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = prompt {
                write!(output, "{}", prompt)?;
                output.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.execute_line(line) {
                Ok(CommandResult::Continue(text)) => write!(output, "{}", text)?,
                Ok(CommandResult::Exit) => break,
                Err(e) => writeln!(output, "错误: {}", e)?,
            }
        }
        output.flush()?;
        Ok(())
    }

    /// 全源最短路径快照，图变更后自动重建
    pub fn all_pairs(&mut self) -> &AllPairs<String> {
        let generation = self.engine.generation();
        let fresh = matches!(&self.all_pairs, Some(all) if all.generation() == generation);
        if !fresh {
            debug!(generation, "重建 Floyd-Warshall 快照");
            self.all_pairs = Some(self.engine.build_all_pairs());
        }
        self.all_pairs.as_ref().unwrap()
    }

    pub fn execute(&mut self, command: Command) -> Result<CommandResult> {
        let output = match command {
            Command::Quit => return Ok(CommandResult::Exit),
            Command::Help => Printer::help(),
            Command::Clear => {
                self.engine = Engine::new(self.config.directed);
                self.all_pairs = None;
                "图已清空\n".to_string()
            }
            Command::AddVertex(label) => {
                if self.engine.insert_vertex(label.clone()) {
                    format!("已插入顶点 {}\n", label)
                } else {
                    format!("顶点 {} 已存在\n", label)
                }
            }
            Command::RemoveVertex(label) => {
                self.engine.remove_vertex(&label)?;
                format!("已删除顶点 {}\n", label)
            }
            Command::InsertEdge {
                from,
                to,
                distance,
                duration,
            } => {
                self.engine.insert_edge(&from, &to, distance, duration)?;
                format!("已插入边 {} - {}\n", from, to)
            }
            Command::RemoveEdge { from, to } => {
                self.engine.remove_edge(&from, &to)?;
                format!("已删除边 {} - {}\n", from, to)
            }
            Command::UpdateEdge {
                from,
                to,
                distance,
                duration,
            } => {
                self.engine
                    .update_edge_weight(&from, &to, distance, duration)?;
                format!("已更新边 {} - {}\n", from, to)
            }
            Command::Stats => self.stats()?,
            Command::Vertices => self.vertices()?,
            Command::Connected => {
                let connected = with_graph!(&self.engine, g => g.is_connected());
                if connected {
                    "图是连通的\n".to_string()
                } else {
                    "图不连通\n".to_string()
                }
            }
            Command::Weight { from, to } => {
                let edge = with_graph!(&self.engine, g => g.edge(&from, &to))?;
                let rows = vec![vec![
                    from,
                    to,
                    self.printer.weight(edge.distance),
                    self.printer.weight(edge.duration),
                ]];
                self.printer.print_rows(&["起点", "终点", "距离", "时间"], &rows)?
            }
            Command::Neighbors(label) => {
                let neighbors = with_graph!(&self.engine, g => g.neighbors(&label))?;
                let rows: Vec<Vec<String>> = neighbors
                    .into_iter()
                    .map(|n| {
                        vec![
                            n.label,
                            self.printer.weight(n.distance),
                            self.printer.weight(n.duration),
                        ]
                    })
                    .collect();
                self.printer.print_rows(&["邻居", "距离", "时间"], &rows)?
            }
            Command::Degree(label) => self.degree(&label)?,
            Command::Path { from, to } => self.path(&from, &to)?,
            Command::From(origin) => self.reachability(&origin)?,
            Command::Floyd => self.floyd()?,
            Command::FloydPath { from, to } => {
                let printer = self.printer.clone();
                let all = self.all_pairs();
                let path = all.path(&from, &to)?;
                if path.is_empty() {
                    format!("不存在从 {} 到 {} 的路径\n", from, to)
                } else {
                    let distance = all.distance_between(&from, &to)?;
                    format!(
                        "路径: {}\n距离: {}\n",
                        Printer::path(&path),
                        printer.weight(distance)
                    )
                }
            }
        };
        Ok(CommandResult::Continue(output))
    }

    fn stats(&self) -> Result<String> {
        let (vertices, edges, weight, generation) = with_graph!(&self.engine, g => (
            g.vertex_count(),
            g.edge_count(),
            g.total_weight(),
            g.generation(),
        ));
        let kind = if self.engine.is_directed() { "有向" } else { "无向" };
        let rows = vec![
            vec!["类型".to_string(), kind.to_string()],
            vec!["顶点数".to_string(), vertices.to_string()],
            vec!["边数".to_string(), edges.to_string()],
            vec!["总距离".to_string(), self.printer.weight(weight)],
            vec!["变更代数".to_string(), generation.to_string()],
        ];
        self.printer.print_rows(&["属性", "值"], &rows)
    }

    fn vertices(&self) -> Result<String> {
        let labels = with_graph!(&self.engine, g => g.vertices());
        let rows: Vec<Vec<String>> = labels
            .into_iter()
            .enumerate()
            .map(|(slot, label)| vec![slot.to_string(), label])
            .collect();
        self.printer.print_rows(&["槽位", "顶点"], &rows)
    }

    fn degree(&self, label: &String) -> Result<String> {
        let rows = match &self.engine {
            Engine::Undirected(g) => vec![vec![label.clone(), g.degree(label)?.to_string()]],
            Engine::Directed(g) => vec![vec![
                label.clone(),
                g.out_degree(label)?.to_string(),
                g.in_degree(label)?.to_string(),
                g.degree(label)?.to_string(),
            ]],
        };
        if self.engine.is_directed() {
            self.printer.print_rows(&["顶点", "出度", "入度", "总度"], &rows)
        } else {
            self.printer.print_rows(&["顶点", "度"], &rows)
        }
    }

    fn path(&self, from: &String, to: &String) -> Result<String> {
        let (route, fastest) = with_graph!(&self.engine, g => {
            let finder = g.path_finder();
            (finder.route(from, to)?, finder.shortest_duration(from, to)?)
        });
        let Some(route) = route else {
            return Ok(format!("不存在从 {} 到 {} 的路径\n", from, to));
        };
        Ok(format!(
            "路径: {}\n距离: {}\n沿此路径耗时: {}\n最短耗时: {}\n",
            Printer::path(&route.vertices),
            self.printer.weight(route.distance),
            self.printer.weight(route.duration),
            self.printer.weight(fastest),
        ))
    }

    fn reachability(&self, origin: &String) -> Result<String> {
        let (report, paths) = with_graph!(&self.engine, g => {
            let finder = g.path_finder();
            let report = finder.reachable_from(origin)?;
            let mut paths = Vec::with_capacity(report.reachable.len());
            for dest in &report.reachable {
                paths.push(finder.shortest_path(origin, &dest.label)?);
            }
            (report, paths)
        });

        let rows: Vec<Vec<String>> = report
            .reachable
            .iter()
            .zip(&paths)
            .map(|(dest, path)| {
                vec![
                    dest.label.clone(),
                    self.printer.weight(dest.distance),
                    Printer::path(path),
                ]
            })
            .collect();
        let mut output = self.printer.print_rows(&["目的地", "距离", "路径"], &rows)?;

        if self.printer.mode() != PrintMode::Json {
            if !report.unreachable.is_empty() {
                output.push_str(&format!("不可达: {}\n", report.unreachable.join(", ")));
            }
            output.push_str(&format!(
                "可达 {} 个，不可达 {} 个\n",
                report.reachable.len(),
                report.unreachable.len()
            ));
        }
        Ok(output)
    }

    fn floyd(&mut self) -> Result<String> {
        let printer = self.printer.clone();
        let all = self.all_pairs();
        let labels: Vec<String> = all.labels().cloned().collect();

        let mut columns: Vec<&str> = vec![""];
        columns.extend(labels.iter().map(|s| s.as_str()));
        let rows: Vec<Vec<String>> = all
            .distances()
            .iter()
            .zip(&labels)
            .map(|(row, label)| {
                let mut cells = vec![label.clone()];
                cells.extend(row.iter().map(|&d| printer.weight(d)));
                cells
            })
            .collect();
        printer.print_rows(&columns, &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io;

    fn run(session: &mut Session, line: &str) -> String {
        match session.execute_line(line).unwrap() {
            CommandResult::Continue(out) => out,
            CommandResult::Exit => String::new(),
        }
    }

    fn session(directed: bool) -> Session {
        let mut s = Session::new(SessionConfig::new().with_directed(directed));
        for line in ["add A", "add B", "add C", "edge A B 1 1", "edge B C 1 1", "edge A C 5 1"] {
            run(&mut s, line);
        }
        s
    }

    #[test]
    fn test_path_command() {
        let mut s = session(false);
        let out = run(&mut s, "path A C");
        assert!(out.contains("A → B → C"));
        assert!(out.contains("距离: 2.00"));
        assert!(out.contains("最短耗时: 1.00"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_run_continues_after_errors() {
        let mut s = Session::new(SessionConfig::new());
        let input = "add A\nbogus\n\nedge A Z 1 1\nadd B\nquit\nadd C\n";
        let mut out = Vec::new();
        s.run(input.as_bytes(), &mut out, None).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("错误:").count(), 2);
        assert!(text.contains("已插入顶点 B"));
        assert!(!text.contains("已插入顶点 C"));
        assert_eq!(with_graph!(s.engine(), g => g.vertex_count()), 2);
    }

    #[test]
    fn test_run_prints_prompt() {
        let mut s = Session::new(SessionConfig::new());
        let mut out = Vec::new();
        s.run("add A\n".as_bytes(), &mut out, Some("> ")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "> 已插入顶点 A\n> ");
    }

    #[test]
    fn test_run_reports_write_failure() {
        let mut s = Session::new(SessionConfig::new());
        let result = s.run("add A\n".as_bytes(), ClosedPipe, None);
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn test_all_pairs_follows_generation() {
        let mut s = session(false);
        let first = s.all_pairs().generation();
        assert_eq!(first, s.engine().generation());

        run(&mut s, "add D");
        let second = s.all_pairs().generation();
        assert_eq!(second, s.engine().generation());
        assert!(second > first);
        assert_eq!(s.all_pairs().len(), 4);
    }

    #[test]
    fn test_floyd_snapshot_rebuilds_after_mutation() {
        let mut s = session(false);
        assert_eq!(s.all_pairs().distance(0, 2).unwrap(), 2.0);

        run(&mut s, "remove B");
        let all = s.all_pairs();
        assert_eq!(all.len(), 2);
        assert_eq!(all.distance(0, 1).unwrap(), 5.0);

        let out = run(&mut s, "floyd-path A C");
        assert!(out.contains("A → C"));
    }

    #[test]
    fn test_directed_degree_and_unreachable() {
        let mut s = session(true);
        let out = run(&mut s, "degree A");
        assert!(out.contains("出度"));

        let out = run(&mut s, "path C A");
        assert!(out.contains("不存在"));

        let out = run(&mut s, "from C");
        assert!(out.contains("不可达: A, B"));
    }

    #[test]
    fn test_errors_propagate() {
        let mut s = session(false);
        assert!(s.execute_line("edge A Z 1 1").is_err());
        assert!(s.execute_line("edge A B -1 1").is_err());
        assert!(s.execute_line("unedge B Z").is_err());
        assert!(s.execute_line("bogus").is_err());
        assert_eq!(s.execute_line("quit").unwrap(), CommandResult::Exit);
    }

    #[test]
    fn test_json_output() {
        let mut s = Session::new(SessionConfig::new().with_print_mode(PrintMode::Json));
        run(&mut s, "add A");
        let out = run(&mut s, "vertices");
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["顶点"], "A");
    }
}
