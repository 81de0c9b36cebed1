use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::math::mul_div;

/// Fee rates charged on every non-exempt transfer
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct FeeConfig {
    /// Share of the fee paired back into liquidity
    pub liquidity_fee: u64,
    /// Share of the fee paid out to shareholders as dividends
    pub reward_fee: u64,
    /// Share of the fee forwarded to the marketing wallet
    pub marketing_fee: u64,
    /// Sum of all sub-fees
    pub total_fee: u64,
    /// Denominator the fee rates are expressed against
    pub fee_denominator: u64,
}

/// A fee amount partitioned into its destination buckets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub liquidity: u64,
    pub reward: u64,
    pub marketing: u64,
}

impl FeeConfig {
    pub fn new(liquidity_fee: u64, reward_fee: u64, marketing_fee: u64, fee_denominator: u64) -> Result<Self> {
        let total_fee = liquidity_fee
            .checked_add(reward_fee)
            .and_then(|fee| fee.checked_add(marketing_fee))
            .ok_or(ErrorCode::InvalidFeeConfig)?;

        let config = Self {
            liquidity_fee,
            reward_fee,
            marketing_fee,
            total_fee,
            fee_denominator,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.fee_denominator > 0, ErrorCode::InvalidFeeConfig);

        let sum = self.liquidity_fee
            .checked_add(self.reward_fee)
            .and_then(|fee| fee.checked_add(self.marketing_fee))
            .ok_or(ErrorCode::InvalidFeeConfig)?;
        require!(sum == self.total_fee, ErrorCode::InvalidFeeConfig);

        // Total fee must stay below 25%
        let scaled_total = self.total_fee
            .checked_mul(4)
            .ok_or(ErrorCode::InvalidFeeConfig)?;
        require!(scaled_total < self.fee_denominator, ErrorCode::InvalidFeeConfig);

        Ok(())
    }

    /// Fee owed on a transfer, rounded down so the sender never pays above the nominal rate
    pub fn compute_fee(&self, amount: u64, is_exempt: bool) -> Result<u64> {
        if is_exempt {
            return Ok(0);
        }
        mul_div(amount, self.total_fee, self.fee_denominator)
    }

    /// Partitions a collected fee by sub-fee weight. The rounding remainder
    /// lands in the liquidity bucket so the buckets always sum to `fee`.
    pub fn split_fee(&self, fee: u64) -> Result<FeeSplit> {
        if self.total_fee == 0 {
            return Ok(FeeSplit::default());
        }

        let reward = mul_div(fee, self.reward_fee, self.total_fee)?;
        let marketing = mul_div(fee, self.marketing_fee, self.total_fee)?;
        let liquidity = fee
            .checked_sub(reward)
            .and_then(|rest| rest.checked_sub(marketing))
            .ok_or(ErrorCode::MathOverflow)?;

        Ok(FeeSplit {
            liquidity,
            reward,
            marketing,
        })
    }
}

impl FeeSplit {
    pub fn total(&self) -> Result<u64> {
        let total = self.liquidity
            .checked_add(self.reward)
            .and_then(|sum| sum.checked_add(self.marketing))
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_percent() -> FeeConfig {
        FeeConfig::new(100, 300, 100, 10_000).unwrap()
    }

    #[test]
    fn new_computes_total_fee() {
        let config = FeeConfig::new(200, 800, 400, 10_000).unwrap();
        assert_eq!(config.total_fee, 1_400);
    }

    #[test]
    fn rejects_invalid_configs() {
        let expected = anchor_lang::error::Error::from(ErrorCode::InvalidFeeConfig);
        assert_eq!(FeeConfig::new(100, 100, 100, 0).unwrap_err(), expected);
        assert_eq!(FeeConfig::new(1_000, 1_000, 500, 10_000).unwrap_err(), expected);

        let mut config = five_percent();
        config.total_fee = 400;
        assert_eq!(config.validate().unwrap_err(), expected);
    }

    #[test]
    fn compute_fee_floors() {
        let config = five_percent();
        assert_eq!(config.compute_fee(100, false).unwrap(), 5);
        assert_eq!(config.compute_fee(39, false).unwrap(), 1);
        assert_eq!(config.compute_fee(19, false).unwrap(), 0);
        assert_eq!(config.compute_fee(u64::MAX, false).unwrap(), u64::MAX / 20);
    }

    #[test]
    fn compute_fee_is_zero_when_exempt() {
        assert_eq!(five_percent().compute_fee(1_000_000, true).unwrap(), 0);
    }

    #[test]
    fn split_fee_remainder_goes_to_liquidity() {
        let config = FeeConfig::new(200, 800, 400, 10_000).unwrap();
        let split = config.split_fee(13).unwrap();
        // 13 * 800 / 1400 = 7.43, 13 * 400 / 1400 = 3.71
        assert_eq!(split.reward, 7);
        assert_eq!(split.marketing, 3);
        assert_eq!(split.liquidity, 3);
    }

    #[test]
    fn split_fee_buckets_sum_to_fee() {
        let configs = [
            FeeConfig::new(200, 800, 400, 10_000).unwrap(),
            FeeConfig::new(100, 300, 100, 10_000).unwrap(),
            FeeConfig::new(1, 1, 1, 1_000).unwrap(),
            FeeConfig::new(0, 7, 3, 1_000).unwrap(),
        ];
        let total_supply: u64 = 1_000_000_000_000_000;
        let mut fee: u64 = 0;
        while fee <= total_supply {
            for config in configs.iter() {
                let split = config.split_fee(fee).unwrap();
                assert_eq!(split.total().unwrap(), fee);
            }
            fee = fee * 3 + 1;
        }
        for config in configs.iter() {
            assert_eq!(config.split_fee(total_supply).unwrap().total().unwrap(), total_supply);
        }
    }

    #[test]
    fn split_fee_with_no_fees_is_empty() {
        let config = FeeConfig::new(0, 0, 0, 10_000).unwrap();
        assert_eq!(config.split_fee(0).unwrap(), FeeSplit::default());
        assert_eq!(config.compute_fee(1_000, false).unwrap(), 0);
    }
}
