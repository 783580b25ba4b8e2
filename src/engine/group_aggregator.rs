// ==========================================
// 轮胎库存上报系统 - 分组汇总引擎
// ==========================================
// 职责: 按季节分组汇总库存数量（汇总报表数据源）
// 红线: 季节决定查阅哪组分组；每条记录最多计入一个分组
// ==========================================
// 输入: StockRecord 列表 + GroupConfig
// 输出: VendorGroupSums（所有配置的分组标签都有值，未命中为 0）
// ==========================================

use crate::config::{BrandGroup, GroupConfig};
use crate::domain::stock::{StockRecord, VendorGroupSums};
use crate::domain::types::Season;
use crate::importer::brand_classifier::BrandClassifier;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

// ==========================================
// GroupAggregator - 分组汇总引擎
// ==========================================
pub struct GroupAggregator;

impl GroupAggregator {
    /// 按季节分组汇总
    ///
    /// # 规则
    /// - 仅统计 quantity > 0 的记录
    /// - 夏季记录只查夏季分组，冬季记录只查冬季分组，未知季节不计入
    /// - 按分组声明顺序匹配，首个命中的分组计入，同时累加到总计
    #[instrument(skip(self, records, config), fields(count = records.len()))]
    pub fn aggregate(&self, records: &[StockRecord], config: &GroupConfig) -> VendorGroupSums {
        let mut sums = VendorGroupSums {
            summer: zeroed(&config.summer_groups),
            winter: zeroed(&config.winter_groups),
            grand_total: 0,
        };

        for record in records.iter().filter(|r| r.quantity > 0) {
            let (groups, bucket) = match record.season {
                Season::Summer => (&config.summer_groups, &mut sums.summer),
                Season::Winter => (&config.winter_groups, &mut sums.winter),
                Season::Unknown => continue,
            };

            if let Some(group) = self.first_matching(groups, &record.clean_brand) {
                let quantity = u64::from(record.quantity);
                *bucket.entry(group.label.clone()).or_insert(0) += quantity;
                sums.grand_total += quantity;
            }
        }

        debug!(grand_total = sums.grand_total, "分组汇总完成");
        sums
    }

    fn first_matching<'a>(&self, groups: &'a [BrandGroup], clean_brand: &str) -> Option<&'a BrandGroup> {
        groups
            .iter()
            .find(|group| BrandClassifier.is_vendor_brand(clean_brand, group.brands.as_slice()))
    }
}

fn zeroed(groups: &[BrandGroup]) -> BTreeMap<String, u64> {
    groups.iter().map(|g| (g.label.clone(), 0)).collect()
}
