//! 控制台命令解析
//!
//! 一行一条命令；含空格的标签用双引号括起，例如 `edge "La Paz" Sucre 443 1.0`

use crate::error::{Error, Result};
use std::str::FromStr;

/// 控制台命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    /// 清空当前图
    Clear,
    Stats,
    Vertices,
    Connected,
    AddVertex(String),
    RemoveVertex(String),
    InsertEdge {
        from: String,
        to: String,
        distance: f64,
        duration: f64,
    },
    RemoveEdge {
        from: String,
        to: String,
    },
    UpdateEdge {
        from: String,
        to: String,
        distance: f64,
        duration: f64,
    },
    Weight {
        from: String,
        to: String,
    },
    Neighbors(String),
    Degree(String),
    /// Dijkstra 单对查询
    Path {
        from: String,
        to: String,
    },
    /// Dijkstra 单源报告
    From(String),
    /// Floyd-Warshall 距离矩阵
    Floyd,
    FloydPath {
        from: String,
        to: String,
    },
}

/// 拆分命令行，支持双引号
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(Error::ParseError("引号未闭合".to_string()));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_weight(token: &str, name: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| Error::ParseError(format!("无效的{}: {}", name, token)))
}

fn expect_args(cmd: &str, args: &[String], count: usize, usage: &str) -> Result<()> {
    if args.len() != count {
        return Err(Error::ParseError(format!("用法: {} {}", cmd, usage)));
    }
    Ok(())
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let tokens = tokenize(line)?;
        let Some((head, args)) = tokens.split_first() else {
            return Err(Error::ParseError("空命令".to_string()));
        };
        let cmd = head.to_lowercase();
        let pair = |usage: &str| -> Result<(String, String)> {
            expect_args(&cmd, args, 2, usage)?;
            Ok((args[0].clone(), args[1].clone()))
        };
        let single = |usage: &str| -> Result<String> {
            expect_args(&cmd, args, 1, usage)?;
            Ok(args[0].clone())
        };

        let command = match cmd.as_str() {
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "clear" => Command::Clear,
            "stats" | "info" => Command::Stats,
            "vertices" | "ls" => Command::Vertices,
            "connected" => Command::Connected,
            "floyd" => Command::Floyd,
            "add" => Command::AddVertex(single("<顶点>")?),
            "remove" | "rm" => Command::RemoveVertex(single("<顶点>")?),
            "neighbors" | "n" => Command::Neighbors(single("<顶点>")?),
            "degree" => Command::Degree(single("<顶点>")?),
            "from" => Command::From(single("<起点>")?),
            "edge" => match args.len() {
                2 => Command::InsertEdge {
                    from: args[0].clone(),
                    to: args[1].clone(),
                    distance: 0.0,
                    duration: 0.0,
                },
                4 => Command::InsertEdge {
                    from: args[0].clone(),
                    to: args[1].clone(),
                    distance: parse_weight(&args[2], "距离")?,
                    duration: parse_weight(&args[3], "时间")?,
                },
                _ => {
                    return Err(Error::ParseError(
                        "用法: edge <起点> <终点> [距离 时间]".to_string(),
                    ))
                }
            },
            "update" => {
                expect_args(&cmd, args, 4, "<起点> <终点> <距离> <时间>")?;
                Command::UpdateEdge {
                    from: args[0].clone(),
                    to: args[1].clone(),
                    distance: parse_weight(&args[2], "距离")?,
                    duration: parse_weight(&args[3], "时间")?,
                }
            }
            "unedge" => {
                let (from, to) = pair("<起点> <终点>")?;
                Command::RemoveEdge { from, to }
            }
            "weight" => {
                let (from, to) = pair("<起点> <终点>")?;
                Command::Weight { from, to }
            }
            "path" | "shortest" => {
                let (from, to) = pair("<起点> <终点>")?;
                Command::Path { from, to }
            }
            "floyd-path" => {
                let (from, to) = pair("<起点> <终点>")?;
                Command::FloydPath { from, to }
            }
            other => return Err(Error::ParseError(format!("未知命令: {}", other))),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"edge "La Paz" Sucre 443 1.0"#).unwrap(),
            vec!["edge", "La Paz", "Sucre", "443", "1.0"]
        );
        assert_eq!(tokenize("  add   A ").unwrap(), vec!["add", "A"]);
        assert_eq!(tokenize(r#"add """#).unwrap(), vec!["add", ""]);
        assert!(tokenize(r#"add "La Paz"#).is_err());
    }

    #[test]
    fn test_parse_edge() {
        assert_eq!(
            "edge A B 3 0.5".parse::<Command>().unwrap(),
            Command::InsertEdge {
                from: "A".into(),
                to: "B".into(),
                distance: 3.0,
                duration: 0.5,
            }
        );
        assert_eq!(
            "EDGE A B".parse::<Command>().unwrap(),
            Command::InsertEdge {
                from: "A".into(),
                to: "B".into(),
                distance: 0.0,
                duration: 0.0,
            }
        );
        assert!("edge A B x 1".parse::<Command>().is_err());
        assert!("edge A".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!(
            r#"from "Santa Cruz""#.parse::<Command>().unwrap(),
            Command::From("Santa Cruz".into())
        );
        assert_eq!(
            "floyd-path A C".parse::<Command>().unwrap(),
            Command::FloydPath {
                from: "A".into(),
                to: "C".into()
            }
        );
        assert!("frobnicate".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
        assert!("add".parse::<Command>().is_err());
    }
}
