//! 分隔符文本输出
//!
//! 每行一条记录，字段用单个分隔符连接。分隔符不是 `,` 时用 `,` 作为小数点。

use std::io::{self, BufWriter, Write};

use super::RowSink;

/// 按分隔符写出结果行
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    out: BufWriter<W>,
    separator: char,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, separator: char) -> Self {
        Self {
            out: BufWriter::new(writer),
            separator,
        }
    }

    /// 取回底层 writer（会先刷新缓冲）
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

/// 格式化一个实数；分隔符不是 `,` 时把小数点写成 `,`
pub fn format_real(value: f64, separator: char) -> String {
    let s = value.to_string();
    if separator == ',' {
        s
    } else {
        s.replace('.', ",")
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn header(&mut self, names: &[String]) -> io::Result<()> {
        write!(self.out, "time")?;
        for name in names {
            write!(self.out, "{}{}", self.separator, name)?;
        }
        writeln!(self.out)
    }

    fn row(&mut self, time: f64, values: &[f64]) -> io::Result<()> {
        write!(self.out, "{}", format_real(time, self.separator))?;
        for v in values {
            write!(self.out, "{}{}", self.separator, format_real(*v, self.separator))?;
        }
        writeln!(self.out)
    }

    fn close(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
